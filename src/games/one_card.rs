//! One-card poker.
//!
//! Each player antes 1 and is privately dealt one of `n_cards` distinct
//! cards. P1 checks or bets 1, P2 checks/folds or bets/calls, and after a
//! check and a bet P1 folds or calls. With three cards this is Kuhn poker.
use crate::{
    action::Action,
    error::{Error, Result},
    game::{Game, GameBuilder},
    info_set::InformationSetId,
    node::NodeId,
    player::Player,
};

/// Check, or fold when facing a bet.
pub const CHECK: Action = Action::new(0);
/// Bet, or call when facing a bet.
pub const BET: Action = Action::new(1);

pub fn card(value: usize) -> Action {
    Action::new(value)
}

/// Build the game with cards numbered `1..=n_cards`.
pub fn game(n_cards: usize) -> Result<Game> {
    if n_cards < 2 {
        return Err(Error::Configuration(format!(
            "one-card poker needs at least 2 cards, got {}",
            n_cards
        )));
    }
    let mut builder = GameBuilder::new();
    let mut deals = Vec::new();
    for c1 in 1..=n_cards {
        let mut outcomes = Vec::new();
        for c2 in (1..=n_cards).filter(|c2| *c2 != c1) {
            let child_id = betting(&mut builder, [c1, c2], &mut Vec::new())?;
            outcomes.push((card(c2), 1.0 / (n_cards - 1) as f64, child_id));
        }
        let node_id = builder.chance(&[Player::P1], outcomes)?;
        deals.push((card(c1), 1.0 / n_cards as f64, node_id));
    }
    let root = builder.chance(&[Player::P2], deals)?;
    builder.build(root)
}

/// Information set of `player` holding `card` after `betting`.
pub fn info_set_id(player: Player, card_value: usize, betting: &[Action]) -> InformationSetId {
    let mut history = match player {
        Player::P2 => vec![None, Some(card(card_value))],
        _ => vec![Some(card(card_value)), None],
    };
    history.extend(betting.iter().map(|action| Some(*action)));
    InformationSetId::new(player, history)
}

fn betting(
    builder: &mut GameBuilder,
    cards: [usize; 2],
    history: &mut Vec<Action>,
) -> Result<NodeId> {
    if let Some(value) = payoff(cards, history) {
        return builder.terminal(value);
    }
    let player = if history.len() % 2 == 0 { Player::P1 } else { Player::P2 };
    let mut children = Vec::new();
    for action in [CHECK, BET].iter() {
        history.push(*action);
        children.push((*action, betting(builder, cards, history)?));
        history.pop();
    }
    builder.decision(player, &[], children)
}

/// P1's payoff if `history` ends the hand.
fn payoff(cards: [usize; 2], history: &[Action]) -> Option<f64> {
    let showdown = |stake: f64| if cards[0] > cards[1] { stake } else { -stake };
    match history {
        [CHECK, CHECK] => Some(showdown(1.0)),
        [BET, CHECK] => Some(1.0),
        [BET, BET] => Some(showdown(2.0)),
        [CHECK, BET, CHECK] => Some(-1.0),
        [CHECK, BET, BET] => Some(showdown(2.0)),
        _ => None,
    }
}
