//! Perfect-recall information set identifiers.
//!
//! A node's identifier is the sequence of actions on its path that the
//! acting player observed, with unobserved actions replaced by `None`.
use super::{
    action::Action,
    node::{Node, NodeId},
    player::Player,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct InformationSetId {
    player: Player,
    history: Vec<Option<Action>>,
}

impl InformationSetId {
    pub fn new(player: Player, history: Vec<Option<Action>>) -> Self {
        InformationSetId { player, history }
    }

    /// Player whose view this identifier encodes.
    pub fn player(&self) -> Player {
        self.player
    }
}

impl fmt::Display for InformationSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.player)?;
        for (i, action) in self.history.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match action {
                Some(action) => write!(f, "{}", action)?,
                None => write!(f, "?")?,
            }
        }
        write!(f, "]")
    }
}

/// Identifier of every node as seen by `player`.
pub fn build_information_set_map(
    nodes: &[Node],
    root: NodeId,
    player: Player,
) -> BTreeMap<NodeId, InformationSetId> {
    trace!("start: build_information_set_map({})", player);
    let mut info_sets: BTreeMap<NodeId, InformationSetId> = BTreeMap::new();
    let mut stack: Vec<(NodeId, Vec<Option<Action>>)> = vec![(root, Vec::new())];
    while let Some((node_id, visible)) = stack.pop() {
        if let Some(Node::NonTerminal { edges, hidden_from, .. }) = nodes.get(node_id.index()) {
            let hidden = hidden_from.contains(&player);
            for (action, child_id) in edges.iter() {
                let mut next = visible.clone();
                next.push(if hidden { None } else { Some(*action) });
                stack.push((*child_id, next));
            }
        }
        info_sets.insert(node_id, InformationSetId::new(player, visible));
    }
    trace!("finish: build_information_set_map({})", player);
    info_sets
}

/// Identifier of every decision node, each taken from the index of the
/// player acting there. Chance and terminal nodes get none.
pub fn build_info_set_ids(nodes: &[Node], root: NodeId) -> BTreeMap<NodeId, InformationSetId> {
    let mut info_set_ids = BTreeMap::new();
    for player in Player::PLAYERS.iter() {
        for (node_id, info_set_id) in build_information_set_map(nodes, root, *player) {
            if nodes
                .get(node_id.index())
                .and_then(Node::player)
                .map_or(false, |acting| acting == *player)
            {
                info_set_ids.insert(node_id, info_set_id);
            }
        }
    }
    info_set_ids
}
