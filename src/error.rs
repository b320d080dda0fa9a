use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building games or consuming strategies.
#[derive(Debug, Error)]
pub enum Error {
    /// The game tree or the solver configuration is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A strategy entry is not a distribution, or a strategy is missing an
    /// information set it is queried against.
    #[error("malformed strategy: {0}")]
    MalformedStrategy(String),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
