#![allow(dead_code)]

use efg_cfr::{
    action::{Action, Distribution},
    game::{Game, GameBuilder},
    games::one_card::{info_set_id, BET, CHECK},
    player::Player,
    strategy::{self, Strategy},
};
use rand::Rng;

pub fn dist(probs: &[f64]) -> Distribution {
    probs
        .iter()
        .enumerate()
        .map(|(action, prob)| (Action::new(action), *prob))
        .collect()
}

/// A Kuhn poker equilibrium (P1 never bets); its value for P1 is -1/18.
pub fn kuhn_nash() -> Strategy {
    let third = 1.0 / 3.0;
    let mut strt = Strategy::new();
    for card in 1..=3 {
        strt.insert(info_set_id(Player::P1, card, &[]), dist(&[1.0, 0.0]));
    }
    strt.insert(info_set_id(Player::P1, 1, &[CHECK, BET]), dist(&[1.0, 0.0]));
    strt.insert(info_set_id(Player::P1, 2, &[CHECK, BET]), dist(&[1.0 - third, third]));
    strt.insert(info_set_id(Player::P1, 3, &[CHECK, BET]), dist(&[0.0, 1.0]));

    strt.insert(info_set_id(Player::P2, 1, &[CHECK]), dist(&[1.0 - third, third]));
    strt.insert(info_set_id(Player::P2, 2, &[CHECK]), dist(&[1.0, 0.0]));
    strt.insert(info_set_id(Player::P2, 3, &[CHECK]), dist(&[0.0, 1.0]));
    strt.insert(info_set_id(Player::P2, 1, &[BET]), dist(&[1.0, 0.0]));
    strt.insert(info_set_id(Player::P2, 2, &[BET]), dist(&[1.0 - third, third]));
    strt.insert(info_set_id(Player::P2, 3, &[BET]), dist(&[0.0, 1.0]));
    strt
}

/// A fair coin is flipped, then P2 guesses it and wins 1 on a match.
pub fn coin_game(hidden: bool) -> Game {
    let mut builder = GameBuilder::new();
    let mut outcomes = Vec::new();
    for coin in 0..2 {
        let mut guesses = Vec::new();
        for guess in 0..2 {
            let value = if guess == coin { -1.0 } else { 1.0 };
            guesses.push((Action::new(guess), builder.terminal(value).unwrap()));
        }
        let node_id = builder.decision(Player::P2, &[], guesses).unwrap();
        outcomes.push((Action::new(coin), 0.5, node_id));
    }
    let hidden_from: &[Player] = if hidden { &[Player::P2] } else { &[] };
    let root = builder.chance(hidden_from, outcomes).unwrap();
    builder.build(root).unwrap()
}

/// Random distribution at every information set of both players.
pub fn random_strategy<R: Rng>(game: &Game, rng: &mut R) -> Strategy {
    let mut strt = strategy::random(game, Player::P1, rng);
    strt.extend(strategy::random(game, Player::P2, rng));
    strt
}
