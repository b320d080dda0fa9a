//! Leduc hold'em.
//!
//! A deck holds two copies of each of `n_ranks` ranks. Each player antes 1
//! and receives one private card, then bets; one public card is dealt and a
//! second betting round follows. Raises are 2 in the first round and 4 in
//! the second, at most two per round, and P1 acts first in both rounds. A
//! private card pairing the board wins, otherwise the higher rank wins.
use crate::{
    action::Action,
    error::{Error, Result},
    game::{Game, GameBuilder},
    node::NodeId,
    player::Player,
};

pub const FOLD: Action = Action::new(0);
/// Check, or call when facing a raise.
pub const CALL: Action = Action::new(1);
/// Bet, or raise when facing one.
pub const RAISE: Action = Action::new(2);

const ANTE: f64 = 1.0;
const RAISE_SIZES: [f64; 2] = [2.0, 4.0];
const MAX_RAISES: usize = 2;
const COPIES: usize = 2;

/// Chance action dealing a card of `rank`, distinct from betting actions.
pub fn card(rank: usize) -> Action {
    Action::new(10 + rank)
}

pub fn game(n_ranks: usize) -> Result<Game> {
    if n_ranks < 2 {
        return Err(Error::Configuration(format!(
            "leduc needs at least 2 ranks, got {}",
            n_ranks
        )));
    }
    let mut leduc = LeducBuilder {
        builder: GameBuilder::new(),
    };
    let root = leduc.deal_p1(&vec![COPIES; n_ranks])?;
    leduc.builder.build(root)
}

#[derive(Clone, Debug)]
struct State {
    hole: [usize; 2],
    board: Option<usize>,
    /// Remaining copies per rank.
    deck: Vec<usize>,
    bets: [f64; 2],
    round: usize,
    /// Actions of the current round.
    history: Vec<Action>,
    raises: usize,
}

struct LeducBuilder {
    builder: GameBuilder,
}

impl LeducBuilder {
    fn deal_p1(&mut self, deck: &[usize]) -> Result<NodeId> {
        let mut outcomes = Vec::new();
        for (rank, prob, rest) in draws(deck) {
            outcomes.push((card(rank), prob, self.deal_p2(rank, &rest)?));
        }
        self.builder.chance(&[Player::P2], outcomes)
    }

    fn deal_p2(&mut self, hole_p1: usize, deck: &[usize]) -> Result<NodeId> {
        let mut outcomes = Vec::new();
        for (rank, prob, rest) in draws(deck) {
            let state = State {
                hole: [hole_p1, rank],
                board: None,
                deck: rest,
                bets: [ANTE, ANTE],
                round: 0,
                history: Vec::new(),
                raises: 0,
            };
            outcomes.push((card(rank), prob, self.betting(&state)?));
        }
        self.builder.chance(&[Player::P1], outcomes)
    }

    fn deal_board(&mut self, state: &State) -> Result<NodeId> {
        let mut outcomes = Vec::new();
        for (rank, prob, rest) in draws(&state.deck) {
            let next = State {
                board: Some(rank),
                deck: rest,
                round: state.round + 1,
                history: Vec::new(),
                raises: 0,
                ..state.clone()
            };
            outcomes.push((card(rank), prob, self.betting(&next)?));
        }
        self.builder.chance(&[], outcomes)
    }

    fn betting(&mut self, state: &State) -> Result<NodeId> {
        let me = state.history.len() % 2;
        let other = 1 - me;
        let player = if me == 0 { Player::P1 } else { Player::P2 };
        let facing_raise = state.history.last() == Some(&RAISE);

        let mut children = Vec::new();
        if facing_raise {
            let value = if me == 0 { -state.bets[0] } else { state.bets[1] };
            children.push((FOLD, self.builder.terminal(value)?));
        }

        let mut called = state.clone();
        called.bets[me] = called.bets[other];
        called.history.push(CALL);
        let child_id = if state.history.is_empty() {
            self.betting(&called)?
        } else if state.round == 0 {
            self.deal_board(&called)?
        } else {
            self.builder.terminal(showdown(&called))?
        };
        children.push((CALL, child_id));

        if state.raises < MAX_RAISES {
            let mut raised = state.clone();
            raised.bets[me] = raised.bets[other] + RAISE_SIZES[state.round];
            raised.history.push(RAISE);
            raised.raises += 1;
            children.push((RAISE, self.betting(&raised)?));
        }

        self.builder.decision(player, &[], children)
    }
}

/// Every rank that can be drawn from `deck`, with its probability and the
/// deck left afterwards.
fn draws(deck: &[usize]) -> Vec<(usize, f64, Vec<usize>)> {
    let total: usize = deck.iter().sum();
    deck.iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(rank, count)| {
            let mut rest = deck.to_vec();
            rest[rank] -= 1;
            (rank, *count as f64 / total as f64, rest)
        })
        .collect()
}

/// P1's payoff once both bets are equal.
fn showdown(state: &State) -> f64 {
    let stake = state.bets[0];
    let [p1, p2] = state.hole;
    let paired = |rank: usize| state.board == Some(rank);
    if paired(p1) && !paired(p2) {
        stake
    } else if paired(p2) && !paired(p1) {
        -stake
    } else if p1 > p2 {
        stake
    } else if p2 > p1 {
        -stake
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(hole: [usize; 2], board: usize) -> State {
        State {
            hole,
            board: Some(board),
            deck: Vec::new(),
            bets: [3.0, 3.0],
            round: 1,
            history: Vec::new(),
            raises: 0,
        }
    }

    #[test]
    fn pair_beats_high_card() {
        assert_eq!(showdown(&state([0, 2], 0)), 3.0);
        assert_eq!(showdown(&state([2, 1], 1)), -3.0);
    }

    #[test]
    fn equal_ranks_split() {
        assert_eq!(showdown(&state([1, 1], 2)), 0.0);
    }

    #[test]
    fn draws_follow_remaining_copies() {
        let draws = draws(&[1, 2, 0]);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0, 0);
        assert!((draws[0].1 - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(draws[1].2, vec![1, 1, 0]);
    }
}
