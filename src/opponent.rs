use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::{PokerError, PokerResult};

/// Score of pocket aces, the strongest starting hand under [`hand_strength`].
pub const MAX_STRENGTH: u32 = 14 * 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub name: String,
    pub range_percent: f64,
}

impl OpponentProfile {
    pub fn new(name: impl Into<String>, range_percent: f64) -> PokerResult<Self> {
        let profile = OpponentProfile {
            name: name.into(),
            range_percent,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> PokerResult<()> {
        if !(0.0..=100.0).contains(&self.range_percent) {
            return Err(PokerError::InvalidRange(self.range_percent));
        }
        Ok(())
    }

    pub fn would_play(&self, hole: &[Card; 2]) -> bool {
        would_play(hole, self.range_percent)
    }
}

/// Heuristic preflop score. Not an equity estimate.
pub fn hand_strength(hole: &[Card; 2]) -> u32 {
    let (v1, v2) = (hole[0].value() as u32, hole[1].value() as u32);
    if v1 == v2 {
        return v1 * 8;
    }

    let mut strength = (v1 + v2) * 3;
    if hole[0].suit == hole[1].suit {
        strength += 10;
    }
    match v1.abs_diff(v2) {
        1 => strength += 8,
        2 | 3 => strength += 4,
        _ => {}
    }
    strength
}

pub fn strength_percentile(hole: &[Card; 2]) -> f64 {
    hand_strength(hole) as f64 / MAX_STRENGTH as f64 * 100.0
}

/// Whether an opponent playing the top `range_percent` of hands continues
/// with these hole cards.
pub fn would_play(hole: &[Card; 2], range_percent: f64) -> bool {
    strength_percentile(hole) >= 100.0 - range_percent
}

static DEFAULT_ROSTER: Lazy<Vec<OpponentProfile>> = Lazy::new(|| {
    [
        ("Rishi", 85.0),
        ("Jack", 70.0),
        ("Tony", 75.0),
        ("Chetty", 65.0),
        ("Caius", 60.0),
        ("Aryan", 45.0),
        ("Sachin", 40.0),
        ("Rowan", 20.0),
    ]
    .into_iter()
    .map(|(name, range_percent)| OpponentProfile {
        name: name.to_string(),
        range_percent,
    })
    .collect()
});

pub fn default_roster() -> &'static [OpponentProfile] {
    &DEFAULT_ROSTER
}

/// Reads a JSON array of `{"name": .., "range_percent": ..}` objects.
pub fn load_roster(path: &Path) -> PokerResult<Vec<OpponentProfile>> {
    let text = fs::read_to_string(path)?;
    parse_roster(&text)
}

pub fn parse_roster(json: &str) -> PokerResult<Vec<OpponentProfile>> {
    let roster: Vec<OpponentProfile> = serde_json::from_str(json)?;
    for profile in &roster {
        profile.validate()?;
    }
    log::debug!("loaded roster of {} opponents", roster.len());
    Ok(roster)
}

/// Looks up by 1-based menu number or case-insensitive name.
pub fn find_opponent<'a>(roster: &'a [OpponentProfile], key: &str) -> PokerResult<&'a OpponentProfile> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        if n >= 1 && n <= roster.len() {
            return Ok(&roster[n - 1]);
        }
    }
    roster
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| PokerError::UnknownOpponent(key.to_string()))
}
