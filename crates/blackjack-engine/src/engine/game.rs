use crate::core::{Card, Hand};

/// How a single game ended against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Outcome {
    Win,
    Push,
    Loss,
}

impl Outcome {
    /// Returns what the table pays back for a game staked with `bet`.
    ///
    /// A win pays the stake plus an equal amount, a push returns the stake.
    #[must_use]
    pub fn payout(self, bet: u32) -> f64 {
        let bet = f64::from(bet);
        match self {
            Self::Win => bet * 2.0,
            Self::Push => bet,
            Self::Loss => 0.0,
        }
    }
}

/// One hand under play for one bet.
///
/// A player normally has a single game per round; splitting a pair adds more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    hand: Hand,
    bet: u32,
    doubled: bool,
}

impl Game {
    #[must_use]
    pub const fn new(bet: u32) -> Self {
        Self {
            hand: Hand::new(),
            bet,
            doubled: false,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn bet(&self) -> u32 {
        self.bet
    }

    #[must_use]
    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    pub fn hit(&mut self, card: Card) {
        self.hand.deal(card);
    }

    /// Doubles the bet and takes exactly one more card.
    pub fn double(&mut self, card: Card) {
        self.bet *= 2;
        self.hit(card);
        self.doubled = true;
    }

    /// Splits a two-card hand, keeping the first card and returning a new game
    /// for the second one at the same bet.
    ///
    /// # Panics
    ///
    /// Panics if the hand does not hold exactly two cards.
    pub fn split(&mut self) -> Self {
        let [keep, split] = self.hand.cards() else {
            panic!("only a two-card hand can be split, got {}", self.hand);
        };
        let (keep, split) = (*keep, *split);
        self.hand = Hand::from([keep]);
        Self {
            hand: Hand::from([split]),
            bet: self.bet,
            doubled: false,
        }
    }

    /// Compares this game against the dealer's final hand.
    ///
    /// A player bust loses even if the dealer busts too.
    #[must_use]
    pub fn outcome(&self, dealer_hand: &Hand) -> Outcome {
        let player = self.hand.score();
        let dealer = dealer_hand.score();

        if player.busted {
            return Outcome::Loss;
        }
        if dealer.busted || player.high > dealer.high {
            return Outcome::Win;
        }
        if player.high == dealer.high {
            return Outcome::Push;
        }
        Outcome::Loss
    }
}
