//! Evolving blackjack strategies by simulated play.
//!
//! Each generation, every candidate chromosome is decoded into a
//! [`Strategy`](blackjack_engine::Strategy), seated as a player at one shared
//! table and played for a fixed number of rounds. The players' final statistics
//! are turned into fitness scores by a [`FitnessFunction`] and fed to the
//! [`GenerationEvolver`](blackjack_genetics::GenerationEvolver) to breed the next
//! generation.
//!
//! ```text
//! GenerationEvolver
//!     ↓ breeds
//! Chromosomes
//!     ↓ decoded into
//! Strategies → Players → Table::run_many
//!     ↓ produce
//! PlayerStatistics
//!     ↓ scored by
//! FitnessFunction
//!     ↓ guides
//! the next generation
//! ```

use blackjack_engine::{CursorOutOfBoundsError, PenetrationError, StrategyDecodeError};

pub use self::{fitness::*, report::*, session::*};

pub mod fitness;
pub mod report;
pub mod session;

/// Raised when a session is misconfigured or a generation cannot be played out.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("chromosome did not decode into a strategy: {_0}")]
    Decode(#[error(source)] StrategyDecodeError),
    #[display("table could not deal: {_0}")]
    Table(#[error(source)] CursorOutOfBoundsError),
    #[display("invalid shoe: {_0}")]
    Penetration(#[error(source)] PenetrationError),
}
