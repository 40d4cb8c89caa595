use serde::{Deserialize, Serialize};
use std::fmt;

/// Suits in ascending manilha strength: ♦ < ♠ < ♥ < ♣ (the "zap").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Spades,
    Hearts,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs];

    /// Position in the canonical trump order (clubs strongest).
    pub fn trump_strength(&self) -> u8 {
        match self {
            Suit::Diamonds => 0,
            Suit::Spades => 1,
            Suit::Hearts => 2,
            Suit::Clubs => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Diamonds => write!(f, "♦"),
            Suit::Spades => write!(f, "♠"),
            Suit::Hearts => write!(f, "♥"),
            Suit::Clubs => write!(f, "♣"),
        }
    }
}

/// Truco ranking, not numeric: 4 is the weakest card, 3 the strongest.
/// The deck has no 8, 9 or 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Queen,
    Jack,
    King,
    Ace,
    Two,
    Three,
}

impl Rank {
    pub const ALL: [Rank; 10] = [
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Queen,
        Rank::Jack,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::Three,
    ];

    /// Strength among plain (non-manilha) cards, 0 to 9.
    pub fn strength(&self) -> u8 {
        match self {
            Rank::Four => 0,
            Rank::Five => 1,
            Rank::Six => 2,
            Rank::Seven => 3,
            Rank::Queen => 4,
            Rank::Jack => 5,
            Rank::King => 6,
            Rank::Ace => 7,
            Rank::Two => 8,
            Rank::Three => 9,
        }
    }

    /// Rank above this one, wrapping: a 3 turned as vira makes the 4s manilha.
    pub fn next_wrapping(&self) -> Rank {
        match self {
            Rank::Four => Rank::Five,
            Rank::Five => Rank::Six,
            Rank::Six => Rank::Seven,
            Rank::Seven => Rank::Queen,
            Rank::Queen => Rank::Jack,
            Rank::Jack => Rank::King,
            Rank::King => Rank::Ace,
            Rank::Ace => Rank::Two,
            Rank::Two => Rank::Three,
            Rank::Three => Rank::Four,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Four => write!(f, "4"),
            Rank::Five => write!(f, "5"),
            Rank::Six => write!(f, "6"),
            Rank::Seven => write!(f, "7"),
            Rank::Queen => write!(f, "Q"),
            Rank::Jack => write!(f, "J"),
            Rank::King => write!(f, "K"),
            Rank::Ace => write!(f, "A"),
            Rank::Two => write!(f, "2"),
            Rank::Three => write!(f, "3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_strength_follows_truco_order() {
        // 4 < 5 < 6 < 7 < Q < J < K < A < 2 < 3
        let mut previous = None;
        for rank in Rank::ALL {
            if let Some(p) = previous {
                assert!(rank.strength() > p, "{rank} should outrank its predecessor");
            }
            previous = Some(rank.strength());
        }
        assert!(Rank::Queen.strength() > Rank::Seven.strength());
        assert!(Rank::Three.strength() > Rank::Ace.strength());
    }

    #[test]
    fn next_wrapping_wraps_three_to_four() {
        assert_eq!(Rank::Three.next_wrapping(), Rank::Four);
        assert_eq!(Rank::Seven.next_wrapping(), Rank::Queen);
        assert_eq!(Rank::Ace.next_wrapping(), Rank::Two);
    }

    #[test]
    fn clubs_is_the_strongest_trump_suit() {
        assert!(Suit::Clubs.trump_strength() > Suit::Hearts.trump_strength());
        assert!(Suit::Hearts.trump_strength() > Suit::Spades.trump_strength());
        assert!(Suit::Spades.trump_strength() > Suit::Diamonds.trump_strength());
    }

    #[test]
    fn card_display() {
        assert_eq!(Card::new(Rank::Seven, Suit::Hearts).to_string(), "7♥");
        assert_eq!(Card::new(Rank::Queen, Suit::Clubs).to_string(), "Q♣");
    }
}
