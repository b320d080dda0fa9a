use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Iterations between two comparisons of the average strategy.
pub const CONVERGENCE_INTERVAL: usize = 100;
/// Training stops once the average strategy moves less than this over one
/// convergence interval.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-5;
/// Iterations between two exploitability reports.
pub const REPORT_INTERVAL: usize = 1000;

/// Configuration of a CFR run.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CfrConfig {
    /// Maximum number of iterations.
    pub iterations: usize,
    /// Seed of the chance sampler.
    pub seed: u64,
    pub convergence_interval: usize,
    pub convergence_threshold: f64,
    pub report_interval: usize,
    pub show_progress: bool,
}

impl Default for CfrConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            seed: 0,
            convergence_interval: CONVERGENCE_INTERVAL,
            convergence_threshold: CONVERGENCE_THRESHOLD,
            report_interval: REPORT_INTERVAL,
            show_progress: false,
        }
    }
}

impl CfrConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: CfrConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.convergence_interval == 0 {
            return Err(Error::Configuration("convergence_interval must be > 0".into()));
        }
        if self.report_interval == 0 {
            return Err(Error::Configuration("report_interval must be > 0".into()));
        }
        if !(self.convergence_threshold >= 0.0 && self.convergence_threshold.is_finite()) {
            return Err(Error::Configuration(format!(
                "convergence_threshold must be a non-negative number, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}
