//! Concrete games built on [`GameBuilder`](crate::game::GameBuilder).
pub mod leduc;
pub mod one_card;
