//! Monte-Carlo estimate of the value of one strategy against another.
use super::{
    action,
    error::{Error, Result},
    game::Game,
    player::Player,
    profile::{self, Profile},
    strategy::{Strategy, STRATEGY_TOLERANCE},
};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Evaluation {
    /// P1's utility in every rollout, in order.
    pub samples: Vec<f64>,
    pub mean: f64,
}

/// Roll out `num_samples` games with P1 following `strt_1` and P2 following
/// `strt_2`, recording P1's utility at each terminal node.
pub fn expected_value<R: Rng>(
    game: &Game,
    strt_1: &Strategy,
    strt_2: &Strategy,
    num_samples: usize,
    rng: &mut R,
) -> Result<Evaluation> {
    if num_samples == 0 {
        return Err(Error::Configuration("num_samples must be > 0".into()));
    }
    let prof = profile::from_strt(Player::P1, strt_1.clone(), Player::P2, strt_2.clone())?;
    let samples = (0..num_samples)
        .map(|_| rollout(game, &prof, rng))
        .collect::<Result<Vec<f64>>>()?;
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    debug!("mean of {} rollouts: {:.6}", samples.len(), mean);
    Ok(Evaluation { samples, mean })
}

/// Both players follow `strt`.
pub fn evaluate<R: Rng>(
    game: &Game,
    strt: &Strategy,
    num_samples: usize,
    rng: &mut R,
) -> Result<Evaluation> {
    expected_value(game, strt, strt, num_samples, rng)
}

fn rollout<R: Rng>(game: &Game, prof: &Profile, rng: &mut R) -> Result<f64> {
    let mut node_id = game.root();
    while !game.is_terminal(node_id) {
        let dist = profile::distribution_at(game, prof, node_id)?;
        if !action::is_normalized(&dist, STRATEGY_TOLERANCE) {
            return Err(Error::MalformedStrategy(format!(
                "distribution at node {} does not sum to one: {:?}",
                node_id, dist
            )));
        }
        node_id = action::sample(&dist, rng)
            .and_then(|action| game.child(node_id, action))
            .ok_or_else(|| {
                Error::MalformedStrategy(format!("no playable action at node {}", node_id))
            })?;
    }
    game.utility(node_id, Player::P1)
        .ok_or_else(|| Error::Configuration(format!("node {} has no utility", node_id)))
}
