use super::{
    action::{self, Distribution},
    error::{Error, Result},
    game::Game,
    node::{Node, NodeId},
    player::Player,
    strategy::{self, Strategy},
};
use std::collections::BTreeMap;

/// One strategy per strategic player.
pub type Profile = BTreeMap<Player, Strategy>;

pub fn from_strt(a: Player, a_strt: Strategy, b: Player, b_strt: Strategy) -> Result<Profile> {
    if a == Player::C || b == Player::C || a == b {
        return Err(Error::MalformedStrategy(format!(
            "a profile needs one strategy for each of P1 and P2, got {} and {}",
            a, b
        )));
    }
    Ok(vec![(a, a_strt), (b, b_strt)].into_iter().collect())
}

/// Distribution over the actions taken at `node_id`: the chance
/// distribution at chance nodes, otherwise the acting player's strategy,
/// falling back to uniform where the strategy has no entry.
pub fn distribution_at(game: &Game, prof: &Profile, node_id: NodeId) -> Result<Distribution> {
    match game.node(node_id) {
        Node::Terminal { .. } => Err(Error::Configuration(format!(
            "terminal node {} has no actions",
            node_id
        ))),
        Node::NonTerminal { player: Player::C, .. } => game
            .chance_probs(node_id)
            .cloned()
            .ok_or_else(|| {
                Error::Configuration(format!("chance node {} has no probabilities", node_id))
            }),
        Node::NonTerminal { player, .. } => {
            let info_set_id = game.info_set_id(node_id).ok_or_else(|| {
                Error::Configuration(format!("decision node {} has no information set", node_id))
            })?;
            match prof.get(player) {
                Some(strt) if strt.contains_key(info_set_id) => {
                    strategy::distribution(strt, info_set_id).map(Clone::clone)
                }
                _ => Ok(action::uniform(&game.actions(node_id))),
            }
        }
    }
}
