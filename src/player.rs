use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Player {
    P1,
    P2,
    C,
}

impl Player {
    /// The two strategic players, in traversal order.
    pub const PLAYERS: [Player; 2] = [Player::P1, Player::P2];

    pub fn opponent(&self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::C => panic!("Player::C has no opponent"),
        }
    }

    /// Sign applied to a terminal value (stored from P1's view) to get this
    /// player's utility.
    pub fn sign(&self) -> f64 {
        match self {
            Player::P1 => 1.0,
            Player::P2 => -1.0,
            Player::C => panic!("Player::C has no sign"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "P1"),
            Player::P2 => write!(f, "P2"),
            Player::C => write!(f, "C"),
        }
    }
}
