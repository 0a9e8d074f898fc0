//! Deterministic blackjack simulator.
//!
//! The [`core`] module holds the card-level rules (card values, hand scoring,
//! the shoe) and the [`engine`] module builds a table on top of them: a strategy
//! codec, per-hand games, players driven by a strategy, and the round orchestrator.
//!
//! # Example
//!
//! ```
//! use blackjack_engine::{Player, Shoe, Strategy, Table, TablePlayer as _};
//! use blackjack_random::SeededRandomizer;
//!
//! // always hit, bankroll 0x0100, bet 0x0005
//! let raw = format!("{}01000005", "H".repeat(340));
//! let strategy: Strategy = raw.parse().unwrap();
//!
//! let mut table = Table::new(vec![Box::new(Player::new(strategy))], Shoe::new(6));
//! let mut rng = SeededRandomizer::with_seed("00000000000000000000000000000042".parse().unwrap());
//! let rounds = table.run_many(20, &mut rng).unwrap();
//!
//! let stats = table.players()[0].statistics();
//! assert_eq!(stats.games_seen, rounds);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Raised when the shoe cursor would move past the last card.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "shoe cursor out of bounds: shoe of size {size} had cursor at {cursor} and received offset of {offset}"
)]
pub struct CursorOutOfBoundsError {
    pub cursor: usize,
    pub offset: usize,
    pub size: usize,
}

/// Raised when a penetration fraction cannot be used to deal a shoe.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum PenetrationError {
    #[display("penetration must lie strictly between 0 and 1, got {fraction}")]
    OutOfRange { fraction: f64 },
    #[display(
        "penetration {fraction} leaves {reserve} of {size} cards past the cut, at least {required} are needed to finish a round"
    )]
    NoRoomForRound {
        fraction: f64,
        size: usize,
        reserve: usize,
        required: usize,
    },
}

/// Raised when a raw strategy encoding cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StrategyDecodeError {
    #[display("expected strategy length to be {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("invalid action {found:?} at position {position}")]
    InvalidAction { position: usize, found: char },
    #[display("invalid hex in {field} field: {raw:?}")]
    ParseHex { field: &'static str, raw: String },
}
