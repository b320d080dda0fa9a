use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Action(usize);

impl Action {
    pub const fn new(id: usize) -> Self {
        Action(id)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Probability (or accumulated weight) per action, ordered by action.
pub type Distribution = BTreeMap<Action, f64>;

pub fn uniform(actions: &[Action]) -> Distribution {
    let prob = 1.0 / actions.len() as f64;
    actions.iter().map(|action| (*action, prob)).collect()
}

pub fn zeros(actions: &[Action]) -> Distribution {
    actions.iter().map(|action| (*action, 0.0)).collect()
}

pub fn total(dist: &Distribution) -> f64 {
    dist.values().sum()
}

pub fn is_normalized(dist: &Distribution, tolerance: f64) -> bool {
    dist.values().all(|prob| *prob >= 0.0) && (total(dist) - 1.0).abs() < tolerance
}

/// Draw one action from `dist`.
///
/// Falls back to the last action with positive mass when rounding leaves the
/// cumulative sum just short of the drawn value. Returns `None` only for a
/// distribution without positive mass.
pub fn sample<R: Rng>(dist: &Distribution, rng: &mut R) -> Option<Action> {
    let r: f64 = rng.random();
    let mut cumulative = 0.0;
    for (action, prob) in dist.iter() {
        cumulative += prob;
        if r < cumulative {
            return Some(*action);
        }
    }
    dist.iter()
        .rev()
        .find(|(_, prob)| **prob > 0.0)
        .map(|(action, _)| *action)
}
