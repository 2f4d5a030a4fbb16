use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PokerError, PokerResult};

pub const RANKS_STR: &str = "23456789TJQKA";
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
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
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> PokerResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(PokerError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        // Discriminants run 2..=14, RANKS_STR is indexed from Two.
        RANKS_STR.as_bytes()[self as usize - 2] as char
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

pub const ALL_RANKS: [Rank; 13] = [
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
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> PokerResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(PokerError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// Source of deck permutations.
///
/// Every [`Rng`] shuffles with Fisher-Yates; other implementors exist so a
/// simulation can be replayed against a known deal.
pub trait Shuffler {
    fn shuffle_cards(&mut self, cards: &mut [Card]);
}

impl<R: Rng + ?Sized> Shuffler for R {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        cards.shuffle(self);
    }
}

/// Moves a fixed card sequence to the top of the deck, in order, and leaves
/// every other card where it was. Cards not in the deck are skipped.
#[derive(Debug, Clone)]
pub struct StackedShuffler {
    top: Vec<Card>,
}

impl StackedShuffler {
    pub fn new(top: Vec<Card>) -> Self {
        StackedShuffler { top }
    }
}

impl Shuffler for StackedShuffler {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        let mut next = 0;
        for card in &self.top {
            if let Some(pos) = cards[next..].iter().position(|c| c == card) {
                cards.swap(next, next + pos);
                next += 1;
            }
        }
    }
}

/// A single-use deck: fixed storage, live cards compacted at the front,
/// dealing advances a cursor over the live cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    len: usize,
    dealt: usize,
}

impl Deck {
    pub fn new() -> Deck {
        let cards = std::array::from_fn(|i| Card::new(ALL_RANKS[i / 4], ALL_SUITS[i % 4]));
        Deck {
            cards,
            len: DECK_SIZE,
            dealt: 0,
        }
    }

    /// Removes every listed card still in the undealt part of the deck.
    pub fn remove(&mut self, cards: &[Card]) -> &mut Self {
        for card in cards {
            if let Some(pos) = self.cards[self.dealt..self.len].iter().position(|c| c == card) {
                self.len -= 1;
                self.cards.swap(self.dealt + pos, self.len);
            }
        }
        self
    }

    pub fn shuffle<S: Shuffler + ?Sized>(&mut self, source: &mut S) -> &mut Self {
        source.shuffle_cards(&mut self.cards[self.dealt..self.len]);
        self
    }

    pub fn deal(&mut self, n: usize) -> PokerResult<Vec<Card>> {
        let start = self.take(n)?;
        Ok(self.cards[start..start + n].to_vec())
    }

    pub fn deal_array<const N: usize>(&mut self) -> PokerResult<[Card; N]> {
        let start = self.take(N)?;
        Ok(std::array::from_fn(|i| self.cards[start + i]))
    }

    fn take(&mut self, n: usize) -> PokerResult<usize> {
        let available = self.len - self.dealt;
        if n > available {
            return Err(PokerError::NotEnoughDeck {
                requested: n,
                available,
            });
        }
        let start = self.dealt;
        self.dealt += n;
        Ok(start)
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.dealt..self.len]
    }

    pub fn len(&self) -> usize {
        self.len - self.dealt
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.remaining().contains(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

pub fn parse_card(notation: &str) -> PokerResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(PokerError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses "AsKd7c", "As Kd 7c" or "As,Kd,7c".
pub fn parse_cards(notation: &str) -> PokerResult<Vec<Card>> {
    let compact: String = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if compact.is_empty() || compact.len() % 2 != 0 || !compact.is_ascii() {
        return Err(PokerError::InvalidCardNotation(notation.trim().to_string()));
    }
    compact
        .as_bytes()
        .chunks(2)
        .map(|pair| parse_card(&String::from_utf8_lossy(pair)))
        .collect()
}

/// Exactly two distinct cards.
pub fn parse_hole_cards(notation: &str) -> PokerResult<[Card; 2]> {
    let cards = parse_cards(notation)?;
    if cards.len() != 2 {
        return Err(PokerError::InvalidHandSize {
            expected: 2,
            got: cards.len(),
        });
    }
    if cards[0] == cards[1] {
        return Err(PokerError::DuplicateCard(cards[0].to_string()));
    }
    Ok([cards[0], cards[1]])
}
