use std::{collections::BTreeSet, fmt};

use super::card::Card;

/// Highest total that does not bust.
pub const BLACKJACK: u32 = 21;

/// The `{low, high}` score of a hand.
///
/// For a live hand `low` and `high` are the smallest and largest totals that do not
/// exceed 21; they differ only when an ace can count as 11 (a *soft* hand). For a
/// busted hand they are the smallest and largest of all attainable totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandScore {
    pub low: u32,
    pub high: u32,
    pub busted: bool,
}

/// An ordered sequence of cards.
///
/// Sums and scores are derived on demand and never stored.
///
/// # Example
///
/// ```
/// use blackjack_engine::{Card, Hand, Rank, Suit};
///
/// let hand = Hand::from([
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Diamonds),
/// ]);
///
/// assert_eq!(hand.values(), vec![5, 15, 25]);
///
/// let score = hand.score();
/// assert_eq!((score.low, score.high, score.busted), (5, 15, false));
/// assert!(hand.has_soft_value());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl<const N: usize> From<[Card; N]> for Hand {
    fn from(cards: [Card; N]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl Hand {
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Adds a card to the end of the hand.
    pub fn deal(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Turns every concealed card face up.
    pub fn reveal(&mut self) {
        for card in &mut self.cards {
            card.reveal();
        }
    }

    /// Returns the first concealed card, if any.
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| card.is_hole())
    }

    /// Returns every attainable total, ascending and without duplicates.
    ///
    /// Each card is folded into the set of partial sums reached so far, so a hand
    /// with `k` aces costs `O(k)` set operations instead of `2^k` branches.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.sums().into_iter().collect()
    }

    fn sums(&self) -> BTreeSet<u32> {
        self.cards
            .iter()
            .fold(BTreeSet::from([0]), |partial, card| {
                partial
                    .iter()
                    .flat_map(|sum| card.values().iter().map(move |value| sum + value))
                    .collect()
            })
    }

    /// Returns the `{low, high}` score and whether the hand is busted.
    ///
    /// # Panics
    ///
    /// Panics if the hand has more than two totals not exceeding 21. Two aces
    /// counted as 11 always bust, so this can only happen if the card values
    /// themselves are wrong.
    #[must_use]
    pub fn score(&self) -> HandScore {
        let sums = self.sums();
        let live = sums.range(..=BLACKJACK).copied().collect::<Vec<_>>();
        assert!(
            live.len() <= 2,
            "a hand never has more than two live totals, got {live:?} for {self}"
        );

        let (low, high, busted) = match (live.first(), live.last()) {
            (Some(low), Some(high)) => (*low, *high, false),
            _ => (
                sums.first().copied().unwrap_or_default(),
                sums.last().copied().unwrap_or_default(),
                true,
            ),
        };
        HandScore { low, high, busted }
    }

    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.score().busted
    }

    /// Returns `true` if the first two cards share a rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [first, second, ..] if first.rank() == second.rank())
    }

    /// Returns `true` if an ace can count as either 1 or 11 without busting.
    #[must_use]
    pub fn has_soft_value(&self) -> bool {
        let score = self.score();
        score.low != score.high
    }

    /// Returns `true` for a two-card 21, looking through any concealed card.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        if self.cards.len() != 2 {
            return false;
        }
        let mut revealed = self.clone();
        revealed.reveal();
        revealed.score().high == BLACKJACK
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}
