//! Table-level simulation: strategies, games, players and the round orchestrator.
//!
//! A [`Table`] owns the [`Shoe`](crate::Shoe) and a list of seats implementing
//! [`TablePlayer`]. [`Player`] is the strategy-driven seat; its results are read
//! back as [`PlayerStatistics`].

pub use self::{game::*, player::*, statistics::*, strategy::*, table::*};

pub(crate) mod game;
pub(crate) mod player;
pub(crate) mod statistics;
pub(crate) mod strategy;
pub(crate) mod table;
