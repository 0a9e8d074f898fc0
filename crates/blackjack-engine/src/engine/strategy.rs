//! Strategy codec: a fixed-layout byte string decoded into decision tables.
//!
//! # Encoding
//!
//! A strategy is 348 ASCII bytes laid out as:
//!
//! ```text
//! offset  length  content
//!      0     160  hard table: totals 5..=20, one row of 10 upcards (2..=10, A) each
//!    160      80  soft table: totals 13..=20
//!    240     100  pair table: pairs of 2..=10, then aces
//!    340       4  initial bankroll, hex
//!    344       4  main bet, hex
//! ```
//!
//! Table cells are one of `H` (hit), `S` (stand), `D` (double) or `P` (split).
//! Hard 4 is always a pair of twos and soft 12 always a pair of aces, so neither has
//! a row of its own.
//!
//! [`locus_alphabets`] lists the symbols legal at each offset; the genetic engine
//! uses it to keep every offspring decodable.

use std::{fmt, ops::Range, str::FromStr};

use crate::{
    StrategyDecodeError,
    core::{Hand, Rank},
};

pub const DEALER_UPCARD_COUNT: usize = 10;
pub const HARD_HAND_COUNT: usize = 16;
pub const SOFT_HAND_COUNT: usize = 8;
pub const PAIR_HAND_COUNT: usize = 10;

/// Number of table cells in an encoding.
pub const HAND_COUNT: usize =
    DEALER_UPCARD_COUNT * (HARD_HAND_COUNT + SOFT_HAND_COUNT + PAIR_HAND_COUNT);

pub const BANKROLL_LENGTH: usize = 4;
pub const MAIN_BET_LENGTH: usize = 4;

/// Total length of an encoded strategy.
pub const ENCODED_LENGTH: usize = HAND_COUNT + BANKROLL_LENGTH + MAIN_BET_LENGTH;

const HARD_START: usize = 0;
const SOFT_START: usize = HARD_START + DEALER_UPCARD_COUNT * HARD_HAND_COUNT;
const PAIR_START: usize = SOFT_START + DEALER_UPCARD_COUNT * SOFT_HAND_COUNT;
const BANKROLL_RANGE: Range<usize> = HAND_COUNT..HAND_COUNT + BANKROLL_LENGTH;
const MAIN_BET_RANGE: Range<usize> = BANKROLL_RANGE.end..ENCODED_LENGTH;

const LOWEST_HARD_TOTAL: u32 = 5;
const LOWEST_SOFT_TOTAL: u32 = 13;
const LOWEST_UPCARD: u32 = 2;

pub const ACTION_ALPHABET: &[u8] = b"HSDP";
pub const HEX_ALPHABET: &[u8] = b"0123456789ABCDEF";

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'H' => Some(Self::Hit),
            b'S' => Some(Self::Stand),
            b'D' => Some(Self::Double),
            b'P' => Some(Self::Split),
            _ => None,
        }
    }

    /// Returns `true` for actions that put more money on the table.
    #[must_use]
    pub const fn raises_stake(self) -> bool {
        matches!(self, Self::Double | Self::Split)
    }
}

type ActionTable<const ROWS: usize> = [[Action; DEALER_UPCARD_COUNT]; ROWS];

/// A decoded playing and betting strategy.
///
/// # Example
///
/// ```
/// use blackjack_engine::{Action, Card, Hand, Rank, Strategy, Suit};
///
/// let raw = format!("{}03E80001", "S".repeat(340));
/// let strategy = Strategy::decode(raw.as_bytes()).unwrap();
/// assert_eq!(strategy.initial_bankroll(), 1000);
/// assert_eq!(strategy.bet(), 1);
///
/// let player = Hand::from([Card::new(Rank::Ten, Suit::Spades), Card::new(Rank::Six, Suit::Clubs)]);
/// let dealer = Hand::from([Card::new(Rank::Nine, Suit::Hearts)]);
/// assert_eq!(strategy.play(&player, &dealer), Action::Stand);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    hard: ActionTable<HARD_HAND_COUNT>,
    soft: ActionTable<SOFT_HAND_COUNT>,
    pair: ActionTable<PAIR_HAND_COUNT>,
    initial_bankroll: u32,
    bet: u32,
    raw: Vec<u8>,
}

impl Strategy {
    /// Decodes a raw 348-byte strategy.
    pub fn decode(raw: &[u8]) -> Result<Self, StrategyDecodeError> {
        if raw.len() != ENCODED_LENGTH {
            return Err(StrategyDecodeError::LengthMismatch {
                expected: ENCODED_LENGTH,
                actual: raw.len(),
            });
        }

        Ok(Self {
            hard: decode_table(raw, HARD_START)?,
            soft: decode_table(raw, SOFT_START)?,
            pair: decode_table(raw, PAIR_START)?,
            initial_bankroll: decode_hex(raw, BANKROLL_RANGE, "bankroll")?,
            bet: decode_hex(raw, MAIN_BET_RANGE, "main bet")?,
            raw: raw.to_vec(),
        })
    }

    /// Returns the encoding this strategy was decoded from.
    #[must_use]
    pub fn encoded(&self) -> &[u8] {
        &self.raw
    }

    #[must_use]
    pub fn initial_bankroll(&self) -> u32 {
        self.initial_bankroll
    }

    /// Returns the fixed main-game bet.
    #[must_use]
    pub fn bet(&self) -> u32 {
        self.bet
    }

    /// Returns the table's advice for `player_hand` against the dealer's visible cards.
    ///
    /// Two-card pairs use the pair table, soft hands the soft table and everything
    /// else the hard table. Hands with no cell (21s, busts, unknown upcards) stand.
    #[must_use]
    pub fn play(&self, player_hand: &Hand, dealer_hand: &Hand) -> Action {
        let Some(column) = row_index(dealer_hand.score().high, LOWEST_UPCARD) else {
            return Action::Stand;
        };

        let score = player_hand.score();
        let row = if player_hand.len() == 2 && player_hand.is_pair() {
            pair_row(player_hand.cards()[0].rank()).and_then(|row| self.pair.get(row))
        } else if score.busted {
            None
        } else if score.low != score.high {
            row_index(score.high, LOWEST_SOFT_TOTAL).and_then(|row| self.soft.get(row))
        } else {
            row_index(score.high, LOWEST_HARD_TOTAL).and_then(|row| self.hard.get(row))
        };

        row.and_then(|row| row.get(column))
            .copied()
            .unwrap_or(Action::Stand)
    }
}

impl FromStr for Strategy {
    type Err = StrategyDecodeError;

    /// Decodes a strategy written with arbitrary whitespace between symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect::<Vec<_>>();
        Self::decode(&raw)
    }
}

/// Writes one table row per line, sections separated by blank lines.
///
/// The output parses back with [`FromStr`].
impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            &self.raw[HARD_START..SOFT_START],
            &self.raw[SOFT_START..PAIR_START],
            &self.raw[PAIR_START..HAND_COUNT],
        ];
        for section in sections {
            for row in section.chunks(DEALER_UPCARD_COUNT) {
                writeln!(f, "{}", String::from_utf8_lossy(row))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", String::from_utf8_lossy(&self.raw[BANKROLL_RANGE]))?;
        write!(f, "{}", String::from_utf8_lossy(&self.raw[MAIN_BET_RANGE]))
    }
}

/// Returns the symbols legal at each offset of an encoded strategy.
#[must_use]
pub fn locus_alphabets() -> Vec<&'static [u8]> {
    let mut alphabets = vec![ACTION_ALPHABET; HAND_COUNT];
    alphabets.resize(ENCODED_LENGTH, HEX_ALPHABET);
    alphabets
}

fn decode_table<const ROWS: usize>(
    raw: &[u8],
    start: usize,
) -> Result<ActionTable<ROWS>, StrategyDecodeError> {
    let mut table = [[Action::Stand; DEALER_UPCARD_COUNT]; ROWS];
    let cells = &raw[start..start + ROWS * DEALER_UPCARD_COUNT];
    for (i, byte) in cells.iter().enumerate() {
        table[i / DEALER_UPCARD_COUNT][i % DEALER_UPCARD_COUNT] = Action::from_byte(*byte)
            .ok_or(StrategyDecodeError::InvalidAction {
                position: start + i,
                found: char::from(*byte),
            })?;
    }
    Ok(table)
}

fn decode_hex(
    raw: &[u8],
    range: Range<usize>,
    field: &'static str,
) -> Result<u32, StrategyDecodeError> {
    let digits = &raw[range];
    let error = || StrategyDecodeError::ParseHex {
        field,
        raw: String::from_utf8_lossy(digits).into_owned(),
    };
    // from_str_radix alone would accept a leading '+'
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return Err(error());
    }
    let digits = std::str::from_utf8(digits).map_err(|_| error())?;
    u32::from_str_radix(digits, 16).map_err(|_| error())
}

fn row_index(total: u32, lowest: u32) -> Option<usize> {
    usize::try_from(total.checked_sub(lowest)?).ok()
}

fn pair_row(rank: Rank) -> Option<usize> {
    if rank.is_ace() {
        return Some(PAIR_HAND_COUNT - 1);
    }
    row_index(rank.values()[0], LOWEST_UPCARD)
}
