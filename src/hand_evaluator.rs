use std::cmp::Ordering;
use std::fmt;

use crate::cards::Card;
use crate::error::{PokerError, PokerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
        }
    }
}

/// Category plus tie-breaking ranks, high to low.
///
/// The derived ordering compares category first and then the kicker array
/// lexicographically. Unused kicker slots are zero, and every hand of a given
/// category fills the same number of slots, so padding never decides a
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    category: HandCategory,
    kickers: [u8; 5],
    len: u8,
}

impl HandRank {
    pub fn new(category: HandCategory, tiebreakers: &[u8]) -> Self {
        let mut kickers = [0u8; 5];
        let len = tiebreakers.len().min(5);
        kickers[..len].copy_from_slice(&tiebreakers[..len]);
        HandRank {
            category,
            kickers,
            len: len as u8,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn tiebreakers(&self) -> &[u8] {
        &self.kickers[..self.len as usize]
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers())
    }
}

/// Index sets of every 5-card subset of 7 cards.
pub const FIVE_OF_SEVEN: [[usize; 5]; 21] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 3, 6],
    [0, 1, 2, 4, 5],
    [0, 1, 2, 4, 6],
    [0, 1, 2, 5, 6],
    [0, 1, 3, 4, 5],
    [0, 1, 3, 4, 6],
    [0, 1, 3, 5, 6],
    [0, 1, 4, 5, 6],
    [0, 2, 3, 4, 5],
    [0, 2, 3, 4, 6],
    [0, 2, 3, 5, 6],
    [0, 2, 4, 5, 6],
    [0, 3, 4, 5, 6],
    [1, 2, 3, 4, 5],
    [1, 2, 3, 4, 6],
    [1, 2, 3, 5, 6],
    [1, 2, 4, 5, 6],
    [1, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
];

const WHEEL_MASK: u16 = (1 << 14) | (1 << 5) | (1 << 4) | (1 << 3) | (1 << 2);

fn is_flush(cards: &[Card; 5]) -> bool {
    let mut suits = [0u8; 4];
    for card in cards {
        suits[card.suit.index()] += 1;
    }
    suits.iter().any(|&n| n >= 5)
}

/// High card of the best straight in a rank bitmask (bit r set for rank r).
fn straight_high(mask: u16) -> Option<u8> {
    for high in (6..=14u8).rev() {
        let run = 0b11111u16 << (high - 4);
        if mask & run == run {
            return Some(high);
        }
    }
    if mask & WHEEL_MASK == WHEEL_MASK {
        return Some(5);
    }
    None
}

fn rank_five(cards: &[Card; 5]) -> HandRank {
    let mut counts = [0u8; 15];
    let mut mask = 0u16;
    for card in cards {
        counts[card.value() as usize] += 1;
        mask |= 1 << card.value();
    }

    let flush = is_flush(cards);
    let straight = straight_high(mask);

    if let (true, Some(high)) = (flush, straight) {
        return HandRank::new(HandCategory::StraightFlush, &[high]);
    }

    // (count, rank) groups, largest count first, then highest rank
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for rank in (2..=14u8).rev() {
        let count = counts[rank as usize];
        if count > 0 {
            groups[n] = (count, rank);
            n += 1;
        }
    }
    let groups = &mut groups[..n];
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut shape = [0u8; 5];
    let mut ranks = [0u8; 5];
    for (i, &(count, rank)) in groups.iter().enumerate() {
        shape[i] = count;
        ranks[i] = rank;
    }

    match &shape[..n] {
        [4, 1] => return HandRank::new(HandCategory::FourOfAKind, &ranks[..2]),
        [3, 2] => return HandRank::new(HandCategory::FullHouse, &ranks[..2]),
        _ => {}
    }

    if flush {
        return HandRank::new(HandCategory::Flush, &ranks[..5]);
    }
    if let Some(high) = straight {
        return HandRank::new(HandCategory::Straight, &[high]);
    }

    match &shape[..n] {
        [3, 1, 1] => HandRank::new(HandCategory::ThreeOfAKind, &ranks[..3]),
        [2, 2, 1] => HandRank::new(HandCategory::TwoPair, &ranks[..3]),
        [2, 1, 1, 1] => HandRank::new(HandCategory::OnePair, &ranks[..4]),
        _ => HandRank::new(HandCategory::HighCard, &ranks[..5]),
    }
}

/// Ranks exactly five cards.
pub fn evaluate_five(cards: &[Card]) -> PokerResult<HandRank> {
    let five: &[Card; 5] = cards.try_into().map_err(|_| PokerError::InvalidHandSize {
        expected: 5,
        got: cards.len(),
    })?;
    Ok(rank_five(five))
}

/// Best five-card hand out of exactly seven cards.
pub fn best_hand(cards: &[Card]) -> PokerResult<HandRank> {
    let seven: &[Card; 7] = cards.try_into().map_err(|_| PokerError::InvalidHandSize {
        expected: 7,
        got: cards.len(),
    })?;
    Ok(best_of_seven(seven))
}

pub fn best_of_seven(cards: &[Card; 7]) -> HandRank {
    let mut best = rank_five(&FIVE_OF_SEVEN[0].map(|i| cards[i]));
    for idx in &FIVE_OF_SEVEN[1..] {
        let rank = rank_five(&idx.map(|i| cards[i]));
        if rank > best {
            best = rank;
        }
    }
    best
}

/// Hero against villain on a shared five-card board.
pub fn showdown(hero: &[Card; 2], villain: &[Card; 2], board: &[Card; 5]) -> Ordering {
    let seven = |hole: &[Card; 2]| -> [Card; 7] {
        [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]]
    };
    best_of_seven(&seven(hero)).cmp(&best_of_seven(&seven(villain)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_five_of_seven_table_is_complete() {
        let expected: Vec<Vec<usize>> = (0..7).combinations(5).collect();
        let table: Vec<Vec<usize>> = FIVE_OF_SEVEN.iter().map(|c| c.to_vec()).collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_straight_high_runs() {
        let mask = |ranks: &[u8]| ranks.iter().fold(0u16, |m, &r| m | 1 << r);
        assert_eq!(straight_high(mask(&[10, 11, 12, 13, 14])), Some(14));
        assert_eq!(straight_high(mask(&[2, 3, 4, 5, 6])), Some(6));
        assert_eq!(straight_high(mask(&[14, 2, 3, 4, 5])), Some(5));
        assert_eq!(straight_high(mask(&[14, 2, 3, 4, 6])), None);
        assert_eq!(straight_high(mask(&[13, 14, 2, 3, 4])), None);
    }

    #[test]
    fn test_padding_does_not_leak_into_tiebreakers() {
        let r = HandRank::new(HandCategory::FullHouse, &[14, 13]);
        assert_eq!(r.tiebreakers(), &[14, 13]);
    }
}
