//! Counterfactual Regret Minimization and exact best responses for
//! two-player zero-sum extensive-form games.
//! # Example
//! ```
//! use efg_cfr::*;
//! let game = games::one_card::game(3).unwrap();
//!
//! let config = config::CfrConfig::with_iterations(1000);
//! let strt = cfr::calc_nash_strt(&game, config).unwrap();
//! let exploitability = solver::calc_exploitability(&game, &game.complete(&strt)).unwrap();
//! ```
#[macro_use]
extern crate log;

pub mod action;
pub mod error;
pub mod node;
pub mod player;
pub mod transition;

pub mod game;
pub mod info_set;
pub mod profile;
pub mod strategy;

pub mod cfr;
pub mod config;
pub mod evaluator;
pub mod solver;

pub mod games;

pub use error::{Error, Result};
pub use game::{Game, GameBuilder};
