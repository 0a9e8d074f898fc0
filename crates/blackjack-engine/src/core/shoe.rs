use blackjack_random::Randomizer;

use crate::{CursorOutOfBoundsError, PenetrationError};

use super::card::{Card, Rank, Suit};

/// Number of cards in one deck.
pub const DECK_SIZE: usize = Suit::ALL.len() * Rank::LEN;

/// Fraction of the shoe dealt before a reshuffle is requested, unless overridden.
pub const DEFAULT_PENETRATION: f64 = 0.75;

/// Cards that must lie past the penetration index for [`Shoe::with_penetration`].
///
/// A round that starts just before the cut deals from this reserve.
pub const ROUND_RESERVE: usize = 20;

/// A multi-deck card supply dealt through a forward-only cursor.
///
/// Cards are never removed: dealing just moves the cursor. Once the cursor reaches
/// the penetration index the shoe raises its reshuffle flag, and the owner is
/// expected to call [`Shoe::shuffle`] before the next round.
///
/// # Example
///
/// ```
/// use blackjack_engine::Shoe;
/// use blackjack_random::SeededRandomizer;
///
/// let mut rng = SeededRandomizer::with_seed("0123456789abcdeffedcba9876543210".parse().unwrap());
/// let mut shoe = Shoe::new(1);
/// assert!(shoe.needs_reshuffle());
///
/// shoe.shuffle(&mut rng);
/// shoe.set_penetration(0.5);
///
/// let top = shoe.peek(4).to_vec();
/// shoe.advance_cursor(4).unwrap();
/// assert_eq!(shoe.cursor(), 4);
/// assert_eq!(shoe.peek(48).len(), 48);
/// assert_ne!(top, shoe.peek(4));
/// ```
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    cursor: usize,
    penetration: usize,
    needs_reshuffle: bool,
}

impl Shoe {
    /// Builds an unshuffled shoe of `decks` full decks.
    ///
    /// A fresh shoe reports [`Self::needs_reshuffle`] so that the first round
    /// shuffles it.
    #[must_use]
    pub fn new(decks: usize) -> Self {
        let mut cards = Vec::with_capacity(decks * DECK_SIZE);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        let mut shoe = Self {
            cards,
            cursor: 0,
            penetration: 0,
            needs_reshuffle: true,
        };
        shoe.set_penetration(DEFAULT_PENETRATION);
        shoe
    }

    /// Builds an unshuffled shoe of `decks` decks cut at `fraction`.
    ///
    /// Unlike [`Self::set_penetration`], rejects fractions outside `(0, 1)` and cuts
    /// that leave fewer than [`ROUND_RESERVE`] cards to finish the last round.
    pub fn with_penetration(decks: usize, fraction: f64) -> Result<Self, PenetrationError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(PenetrationError::OutOfRange { fraction });
        }
        let mut shoe = Self::new(decks);
        shoe.set_penetration(fraction);
        let reserve = shoe.size() - shoe.penetration();
        if reserve < ROUND_RESERVE {
            return Err(PenetrationError::NoRoomForRound {
                fraction,
                size: shoe.size(),
                reserve,
                required: ROUND_RESERVE,
            });
        }
        Ok(shoe)
    }

    /// Builds a shoe that deals `cards` in the given order.
    ///
    /// The shoe is considered already shuffled; replays and tests use it to stack
    /// the deck.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut shoe = Self {
            cards,
            cursor: 0,
            penetration: 0,
            needs_reshuffle: false,
        };
        shoe.set_penetration(DEFAULT_PENETRATION);
        shoe
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    #[must_use]
    pub fn penetration(&self) -> usize {
        self.penetration
    }

    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.needs_reshuffle
    }

    /// Sets the penetration index to `floor(fraction * size)`.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn set_penetration(&mut self, fraction: f64) {
        let index = (fraction * self.cards.len() as f64).floor();
        self.penetration = index.clamp(0.0, self.cards.len() as f64) as usize;
    }

    /// Shuffles the whole shoe and starts dealing from the top again.
    ///
    /// Fisher-Yates, then a cut moving the back half to the front, then a second
    /// Fisher-Yates pass.
    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: Randomizer + ?Sized,
    {
        fisher_yates(&mut self.cards, rng);
        let half = self.cards.len() / 2;
        self.cards.rotate_left(half);
        fisher_yates(&mut self.cards, rng);

        self.cursor = 0;
        self.needs_reshuffle = false;
    }

    /// Returns up to `count` cards starting at the cursor.
    ///
    /// Never runs past the end of the shoe: the slice is truncated instead.
    #[must_use]
    pub fn peek(&self, count: usize) -> &[Card] {
        let end = usize::min(self.cursor.saturating_add(count), self.cards.len());
        &self.cards[self.cursor..end]
    }

    /// Returns the card `offset` positions past the cursor, if the shoe has one.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<Card> {
        self.cards.get(self.cursor.checked_add(offset)?).copied()
    }

    /// Moves the cursor forward by `offset` cards and returns the new cursor.
    ///
    /// Raises the reshuffle flag once the cursor reaches the penetration index.
    /// Advancing past the end of the shoe fails and leaves the cursor unchanged.
    pub fn advance_cursor(&mut self, offset: usize) -> Result<usize, CursorOutOfBoundsError> {
        let Some(advance_to) = self
            .cursor
            .checked_add(offset)
            .filter(|to| *to <= self.cards.len())
        else {
            return Err(CursorOutOfBoundsError {
                cursor: self.cursor,
                offset,
                size: self.cards.len(),
            });
        };

        self.cursor = advance_to;
        if self.cursor >= self.penetration {
            self.needs_reshuffle = true;
        }
        Ok(self.cursor)
    }

    /// Deals the card at the cursor and advances past it.
    pub fn draw(&mut self) -> Result<Card, CursorOutOfBoundsError> {
        let cursor = self.cursor;
        self.advance_cursor(1)?;
        Ok(self.cards[cursor])
    }
}

fn fisher_yates<R>(cards: &mut [Card], rng: &mut R)
where
    R: Randomizer + ?Sized,
{
    for i in (1..cards.len()).rev() {
        let j = rng.number_between(0, i);
        cards.swap(i, j);
    }
}
