use super::{action::Action, player::Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index of a node in the game's arena.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Terminal value from P1's point of view.
pub type NodeValue = f64;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub enum Node {
    Terminal {
        value: NodeValue,
    },
    NonTerminal {
        player: Player,
        edges: BTreeMap<Action, NodeId>,
        /// Players who do not observe the action taken here.
        hidden_from: Vec<Player>,
    },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        match self {
            Node::Terminal { .. } => true,
            Node::NonTerminal { .. } => false,
        }
    }

    pub fn utility(&self, player: Player) -> Option<f64> {
        match (self, player) {
            (_, Player::C) => None,
            (Node::Terminal { value }, _) => Some(*value * player.sign()),
            (Node::NonTerminal { .. }, _) => None,
        }
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Node::Terminal { .. } => None,
            Node::NonTerminal { player, .. } => Some(*player),
        }
    }

    pub fn edges(&self) -> Option<&BTreeMap<Action, NodeId>> {
        match self {
            Node::Terminal { .. } => None,
            Node::NonTerminal { edges, .. } => Some(edges),
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.edges()
            .map(|edges| edges.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_hidden_from(&self, player: Player) -> bool {
        match self {
            Node::Terminal { .. } => false,
            Node::NonTerminal { hidden_from, .. } => hidden_from.contains(&player),
        }
    }
}
