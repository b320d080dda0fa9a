use super::{
    action::{self, Action, Distribution},
    error::{Error, Result},
    game::Game,
    info_set::InformationSetId,
    player::Player,
};
use rand::Rng;
use rand_distr::Exp1;
use std::collections::BTreeMap;

/// Strategy entries must sum to one within this tolerance.
pub const STRATEGY_TOLERANCE: f64 = 1e-5;

pub type Strategy = BTreeMap<InformationSetId, Distribution>;

/// Uniform distribution at every information set of both players.
pub fn uniform(game: &Game) -> Strategy {
    game.info_sets()
        .map(|(info_set_id, actions)| (info_set_id.clone(), action::uniform(actions)))
        .collect()
}

pub fn uniform_for(game: &Game, player: Player) -> Strategy {
    game.info_sets()
        .filter(|(info_set_id, _)| info_set_id.player() == player)
        .map(|(info_set_id, actions)| (info_set_id.clone(), action::uniform(actions)))
        .collect()
}

/// Always play `action` at `player`'s information sets, or uniformly where
/// `action` is not available.
pub fn constant(game: &Game, player: Player, action: Action) -> Strategy {
    game.info_sets()
        .filter(|(info_set_id, _)| info_set_id.player() == player)
        .map(|(info_set_id, actions)| {
            (info_set_id.clone(), {
                if actions.contains(&action) {
                    actions
                        .iter()
                        .map(|a| (*a, if *a == action { 1.0 } else { 0.0 }))
                        .collect()
                } else {
                    action::uniform(actions)
                }
            })
        })
        .collect()
}

/// Draw every distribution of `player` uniformly from the probability
/// simplex, i.e. from a Dirichlet distribution with unit concentration.
pub fn random<R: Rng>(game: &Game, player: Player, rng: &mut R) -> Strategy {
    game.info_sets()
        .filter(|(info_set_id, _)| info_set_id.player() == player)
        .map(|(info_set_id, actions)| {
            // normalized unit exponentials
            let weights: Distribution = actions
                .iter()
                .map(|action| (*action, rng.sample::<f64, _>(Exp1)))
                .collect();
            let dist = normalized(&weights).unwrap_or_else(|| action::uniform(actions));
            (info_set_id.clone(), dist)
        })
        .collect()
}

/// Look up the distribution at `info_set_id`, failing if it is absent or
/// not normalized.
pub fn distribution<'a>(
    strt: &'a Strategy,
    info_set_id: &InformationSetId,
) -> Result<&'a Distribution> {
    let dist = strt.get(info_set_id).ok_or_else(|| {
        Error::MalformedStrategy(format!("no distribution for information set {}", info_set_id))
    })?;
    check(info_set_id, dist)?;
    Ok(dist)
}

pub fn validate(strt: &Strategy) -> Result<()> {
    strt.iter()
        .try_for_each(|(info_set_id, dist)| check(info_set_id, dist))
}

fn check(info_set_id: &InformationSetId, dist: &Distribution) -> Result<()> {
    if action::is_normalized(dist, STRATEGY_TOLERANCE) {
        Ok(())
    } else {
        Err(Error::MalformedStrategy(format!(
            "distribution at {} is not a probability distribution: {:?}",
            info_set_id, dist
        )))
    }
}

/// Mean, over information sets present in both strategies, of the
/// root-mean-square difference between their distributions. `None` when
/// they share no information set.
pub fn distance(a: &Strategy, b: &Strategy) -> Option<f64> {
    let distances: Vec<f64> = a
        .iter()
        .filter_map(|(info_set_id, dist_a)| b.get(info_set_id).map(|dist_b| (dist_a, dist_b)))
        .filter(|(dist_a, _)| !dist_a.is_empty())
        .map(|(dist_a, dist_b)| {
            let squared: f64 = dist_a
                .iter()
                .map(|(action, prob)| prob - dist_b.get(action).copied().unwrap_or(0.0))
                .map(|diff| diff * diff)
                .sum();
            (squared / dist_a.len() as f64).sqrt()
        })
        .collect();
    if distances.is_empty() {
        None
    } else {
        Some(distances.iter().sum::<f64>() / distances.len() as f64)
    }
}

/// Scale accumulated weights into a distribution; `None` if they carry no
/// mass.
pub fn normalized(weights: &Distribution) -> Option<Distribution> {
    let norm = action::total(weights);
    if norm > 0.0 {
        Some(
            weights
                .iter()
                .map(|(action, weight)| (*action, weight / norm))
                .collect(),
        )
    } else {
        None
    }
}
