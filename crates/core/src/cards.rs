use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::None => '·',
        }
    }
}

impl Rank {
    pub fn short(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "Jk",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

/// A card the table can draw: identity plus face. Pools may repeat the same
/// face across ids (multi-deck shoes), so `id` is the identity, not the face.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardTemplate {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl CardTemplate {
    pub fn label(&self) -> String {
        if self.rank == Rank::Joker {
            return "Jk*".to_string();
        }
        format!("{}{}", self.rank.short(), self.suit.symbol())
    }
}

/// The static deck definition draws select from. Never depleted by a draw and
/// never touched by a reshuffle; duplicates are allowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePool {
    pub cards: Vec<CardTemplate>,
}

impl SourcePool {
    pub fn standard52() -> Self {
        Self::shoe(1, false)
    }

    pub fn shoe(decks: u32, include_jokers: bool) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * 54);
        let mut next_id = 0u32;
        for _ in 0..decks {
            for suit in [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds] {
                for rank in [
                    Rank::Ace,
                    Rank::Two,
                    Rank::Three,
                    Rank::Four,
                    Rank::Five,
                    Rank::Six,
                    Rank::Seven,
                    Rank::Eight,
                    Rank::Nine,
                    Rank::Ten,
                    Rank::Jack,
                    Rank::Queen,
                    Rank::King,
                ] {
                    cards.push(CardTemplate {
                        id: CardId(next_id),
                        suit,
                        rank,
                    });
                    next_id += 1;
                }
            }
            if include_jokers {
                for _ in 0..2 {
                    cards.push(CardTemplate {
                        id: CardId(next_id),
                        suit: Suit::None,
                        rank: Rank::Joker,
                    });
                    next_id += 1;
                }
            }
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<CardTemplate>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardTemplate> {
        self.cards.get(index)
    }
}
