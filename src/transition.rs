use super::{
    action::{self, Action, Distribution},
    error::{Error, Result},
    node::NodeId,
};
use std::collections::BTreeMap;

/// Chance probabilities must sum to one within this tolerance.
pub const CHANCE_TOLERANCE: f64 = 1e-6;

/// Fixed chance distribution of every chance node.
pub type Transition = BTreeMap<NodeId, Distribution>;

/// Check that `dist` is a probability distribution over exactly `edges`.
pub fn validate(
    node_id: NodeId,
    dist: &Distribution,
    edges: &BTreeMap<Action, NodeId>,
) -> Result<()> {
    if !dist.keys().eq(edges.keys()) {
        return Err(Error::Configuration(format!(
            "chance node {} has probabilities for {:?} but children for {:?}",
            node_id,
            dist.keys().collect::<Vec<_>>(),
            edges.keys().collect::<Vec<_>>(),
        )));
    }
    if let Some((action, prob)) = dist.iter().find(|(_, prob)| !(**prob >= 0.0)) {
        return Err(Error::Configuration(format!(
            "chance node {} has probability {} for action {}",
            node_id, prob, action
        )));
    }
    let total = action::total(dist);
    if (total - 1.0).abs() >= CHANCE_TOLERANCE {
        return Err(Error::Configuration(format!(
            "chance node {} probabilities sum to {}",
            node_id, total
        )));
    }
    Ok(())
}
