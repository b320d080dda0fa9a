//! Exact evaluation of strategies: expected value, best response and
//! exploitability.
use super::{
    action::{Action, Distribution},
    error::{Error, Result},
    game::Game,
    info_set::InformationSetId,
    node::{Node, NodeId},
    player::Player,
    strategy::{self, Strategy},
};
use std::collections::BTreeMap;

/// Nodes `myself` cannot tell apart, each with its reach probability
/// ignoring `myself`'s own choices.
type Partition = Vec<(NodeId, f64)>;

/// Exact expected value for P1 when both players follow `strt`.
pub fn calc_ev(game: &Game, strt: &Strategy) -> Result<f64> {
    calc_ev_inner(game, strt, game.root())
}

fn calc_ev_inner(game: &Game, strt: &Strategy, node_id: NodeId) -> Result<f64> {
    match game.node(node_id) {
        Node::Terminal { value } => Ok(*value),
        Node::NonTerminal { edges, .. } => {
            let dist = distribution_at(game, strt, node_id)?;
            edges
                .iter()
                .map(|(action, child_id)| -> Result<f64> {
                    Ok(prob_of(dist, *action, node_id)? * calc_ev_inner(game, strt, *child_id)?)
                })
                .sum()
        }
    }
}

/// Best response of `myself` against the other player's part of `strt`.
///
/// Returns the best-response value for `myself` together with a pure
/// strategy over `myself`'s information sets. When several actions reach the
/// same value the smallest action wins.
pub fn calc_best_resp(game: &Game, myself: Player, strt: &Strategy) -> Result<(f64, Strategy)> {
    if myself == Player::C {
        return Err(Error::Configuration("chance has no best response".to_string()));
    }
    let mut best_resp = Strategy::new();
    let value = best_resp_inner(game, strt, myself, vec![(game.root(), 1.0)], &mut best_resp)?;
    trace!("best response of {}: {:.8}", myself, value);
    Ok((value, best_resp))
}

/// Sum of both players' best-response values against `strt`. Zero exactly
/// at a Nash equilibrium.
pub fn calc_exploitability(game: &Game, strt: &Strategy) -> Result<f64> {
    let (br1, _) = calc_best_resp(game, Player::P1, strt)?;
    let (br2, _) = calc_best_resp(game, Player::P2, strt)?;
    Ok(br1 + br2)
}

fn best_resp_inner(
    game: &Game,
    strt: &Strategy,
    myself: Player,
    partition: Partition,
    best_resp: &mut Strategy,
) -> Result<f64> {
    let mut value = 0.0;
    let mut others: Partition = Vec::new();
    let mut mine: BTreeMap<InformationSetId, Partition> = BTreeMap::new();
    for (node_id, reach) in partition {
        match game.node(node_id) {
            Node::Terminal { value: v } => value += reach * v * myself.sign(),
            Node::NonTerminal { player, .. } if *player == myself => {
                let info_set_id = info_set_id_at(game, node_id)?;
                mine.entry(info_set_id.clone())
                    .or_default()
                    .push((node_id, reach));
            }
            Node::NonTerminal { .. } => others.push((node_id, reach)),
        }
    }
    if !others.is_empty() {
        value += opponent_turn(game, strt, myself, others, best_resp)?;
    }
    for (info_set_id, nodes) in mine {
        value += my_turn(game, strt, myself, &info_set_id, nodes, best_resp)?;
    }
    Ok(value)
}

/// Chance or the opponent moves: follow every action with its fixed
/// probability. Children reached through an action `myself` observes stay
/// apart per action; children reached through hidden actions merge into
/// one partition.
fn opponent_turn(
    game: &Game,
    strt: &Strategy,
    myself: Player,
    partition: Partition,
    best_resp: &mut Strategy,
) -> Result<f64> {
    let mut next: BTreeMap<Option<Action>, Partition> = BTreeMap::new();
    for (node_id, reach) in partition {
        let node = game.node(node_id);
        let dist = distribution_at(game, strt, node_id)?;
        let hidden = node.is_hidden_from(myself);
        for (action, child_id) in node.edges().into_iter().flatten() {
            let prob = prob_of(dist, *action, node_id)?;
            next.entry(if hidden { None } else { Some(*action) })
                .or_default()
                .push((*child_id, reach * prob));
        }
    }
    next.into_iter()
        .map(|(_, partition)| best_resp_inner(game, strt, myself, partition, best_resp))
        .sum()
}

/// `myself` picks one action for the whole information set.
fn my_turn(
    game: &Game,
    strt: &Strategy,
    myself: Player,
    info_set_id: &InformationSetId,
    partition: Partition,
    best_resp: &mut Strategy,
) -> Result<f64> {
    let actions = game.actions_at(info_set_id).ok_or_else(|| {
        Error::Configuration(format!("unknown information set {}", info_set_id))
    })?;
    let mut best: Option<(Action, f64)> = None;
    for action in actions.iter() {
        let next = partition
            .iter()
            .map(|(node_id, reach)| {
                game.child(*node_id, *action)
                    .map(|child_id| (child_id, *reach))
                    .ok_or_else(|| {
                        Error::Configuration(format!("node {} has no action {}", node_id, action))
                    })
            })
            .collect::<Result<Partition>>()?;
        let value = best_resp_inner(game, strt, myself, next, best_resp)?;
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((*action, value));
        }
    }
    let (best_action, best_value) = best.ok_or_else(|| {
        Error::Configuration(format!("information set {} has no actions", info_set_id))
    })?;
    best_resp.insert(
        info_set_id.clone(),
        actions
            .iter()
            .map(|a| (*a, if *a == best_action { 1.0 } else { 0.0 }))
            .collect(),
    );
    Ok(best_value)
}

fn info_set_id_at(game: &Game, node_id: NodeId) -> Result<&InformationSetId> {
    game.info_set_id(node_id).ok_or_else(|| {
        Error::Configuration(format!("decision node {} has no information set", node_id))
    })
}

fn distribution_at<'a>(
    game: &'a Game,
    strt: &'a Strategy,
    node_id: NodeId,
) -> Result<&'a Distribution> {
    match game.player(node_id) {
        Some(Player::C) => game.chance_probs(node_id).ok_or_else(|| {
            Error::Configuration(format!("chance node {} has no probabilities", node_id))
        }),
        Some(_) => strategy::distribution(strt, info_set_id_at(game, node_id)?),
        None => Err(Error::Configuration(format!("terminal node {} has no actions", node_id))),
    }
}

fn prob_of(dist: &Distribution, action: Action, node_id: NodeId) -> Result<f64> {
    dist.get(&action).copied().ok_or_else(|| {
        Error::MalformedStrategy(format!(
            "no probability for action {} at node {}",
            action, node_id
        ))
    })
}
