use std::fmt;

/// Card suit. Suits never affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
        }
    }
}

/// Card rank, numbered 1 (ace) through 13 (king).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const LEN: usize = 13;

    pub const ALL: [Self; Self::LEN] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the rank number (1 for ace, 13 for king).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns every value this rank can count for.
    ///
    /// Face cards count 10, aces count 1 or 11, everything else counts its number.
    #[must_use]
    pub const fn values(self) -> &'static [u32] {
        match self {
            Self::Ace => &[1, 11],
            Self::Two => &[2],
            Self::Three => &[3],
            Self::Four => &[4],
            Self::Five => &[5],
            Self::Six => &[6],
            Self::Seven => &[7],
            Self::Eight => &[8],
            Self::Nine => &[9],
            Self::Ten | Self::Jack | Self::Queen | Self::King => &[10],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card.
///
/// A card dealt face down (the dealer's hole card) is *concealed*: it contributes
/// nothing to any hand sum until revealed.
///
/// # Example
///
/// ```
/// use blackjack_engine::{Card, Rank, Suit};
///
/// let ace = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(ace.values(), &[1, 11]);
///
/// let hole = Card::new(Rank::Jack, Suit::Hearts).concealed();
/// assert_eq!(hole.values(), &[0]);
/// assert_eq!(hole.revealed().values(), &[10]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    hole: bool,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            hole: false,
        }
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn is_hole(&self) -> bool {
        self.hole
    }

    /// Returns a face-down copy of this card.
    #[must_use]
    pub const fn concealed(self) -> Self {
        Self { hole: true, ..self }
    }

    /// Returns a face-up copy of this card.
    #[must_use]
    pub const fn revealed(self) -> Self {
        Self {
            hole: false,
            ..self
        }
    }

    pub const fn reveal(&mut self) {
        self.hole = false;
    }

    /// Returns every value this card currently counts for.
    #[must_use]
    pub const fn values(&self) -> &'static [u32] {
        if self.hole { &[0] } else { self.rank.values() }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hole {
            return f.write_str("??");
        }
        write!(f, "{}{}", self.rank.as_str(), self.suit.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ace_value() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.values(), &[1, 11]);
    }

    #[test]
    fn test_face_card_value() {
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(Card::new(rank, Suit::Hearts).values(), &[10]);
        }
    }

    #[test]
    fn test_number_card_value() {
        for rank in &Rank::ALL[1..9] {
            let card = Card::new(*rank, Suit::Clubs);
            assert_eq!(card.values(), &[u32::from(rank.number())]);
        }
    }

    #[test]
    fn test_concealed_card_counts_zero() {
        let mut card = Card::new(Rank::Ace, Suit::Diamonds).concealed();
        assert!(card.is_hole());
        assert_eq!(card.values(), &[0]);

        card.reveal();
        assert!(!card.is_hole());
        assert_eq!(card.values(), &[1, 11]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::Ten, Suit::Spades).to_string(), "10S");
        assert_eq!(Card::new(Rank::Queen, Suit::Hearts).to_string(), "QH");
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).concealed().to_string(), "??");
    }
}
