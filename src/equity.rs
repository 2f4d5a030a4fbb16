use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::cards::{Card, Deck, Shuffler};
use crate::error::{PokerError, PokerResult};
use crate::hand_evaluator::showdown;
use crate::opponent::OpponentProfile;

/// Attempt budget per requested hand; folded deals burn attempts.
pub const ATTEMPTS_PER_ITERATION: u64 = 20;
pub const MIN_ITERATIONS: u64 = 100;
pub const MAX_ITERATIONS: u64 = 10_000;

pub const RAISE_THRESHOLD: f64 = 65.0;
pub const CALL_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub wins: u64,
    pub ties: u64,
    pub hands_played: u64,
    pub attempts: u64,
}

impl SimulationResult {
    pub fn losses(&self) -> u64 {
        self.hands_played - self.wins - self.ties
    }

    fn rate(&self, count: u64) -> Option<f64> {
        if self.hands_played == 0 {
            return None;
        }
        Some(count as f64 / self.hands_played as f64 * 100.0)
    }

    pub fn win_rate(&self) -> Option<f64> {
        self.rate(self.wins)
    }

    pub fn tie_rate(&self) -> Option<f64> {
        self.rate(self.ties)
    }

    pub fn loss_rate(&self) -> Option<f64> {
        Some(100.0 - self.win_rate()? - self.tie_rate()?)
    }

    /// Win plus half of ties, as a fraction.
    pub fn equity(&self) -> Option<f64> {
        Some((self.win_rate()? + self.tie_rate()? / 2.0) / 100.0)
    }

    /// True when the attempt cap stopped the run short of `iterations`.
    pub fn is_exhausted(&self, iterations: u64) -> bool {
        self.hands_played < iterations
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.win_rate().map(Recommendation::from_win_rate)
    }
}

impl Add for SimulationResult {
    type Output = SimulationResult;

    fn add(self, other: SimulationResult) -> SimulationResult {
        SimulationResult {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            hands_played: self.hands_played + other.hands_played,
            attempts: self.attempts + other.attempts,
        }
    }
}

impl Sum for SimulationResult {
    fn sum<I: Iterator<Item = SimulationResult>>(iter: I) -> Self {
        iter.fold(SimulationResult::default(), Add::add)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.win_rate(), self.tie_rate(), self.loss_rate()) {
            (Some(win), Some(tie), Some(loss)) => write!(
                f,
                "Win {:.1}% | Tie {:.1}% | Lose {:.1}% ({} hands, {} attempts)",
                win, tie, loss, self.hands_played, self.attempts,
            ),
            _ => write!(f, "No hands played ({} attempts)", self.attempts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Raise,
    Call,
    Fold,
}

impl Recommendation {
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate >= RAISE_THRESHOLD {
            Recommendation::Raise
        } else if win_rate >= CALL_THRESHOLD {
            Recommendation::Call
        } else {
            Recommendation::Fold
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Recommendation::Raise => "Strong hand - play aggressively!",
            Recommendation::Call => "Decent hand - proceed with caution",
            Recommendation::Fold => "Weak hand - consider folding",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Raise => write!(f, "RAISE"),
            Recommendation::Call => write!(f, "CALL"),
            Recommendation::Fold => write!(f, "FOLD"),
        }
    }
}

fn check_inputs(hero: &[Card; 2], iterations: u64) -> PokerResult<()> {
    if hero[0] == hero[1] {
        return Err(PokerError::DuplicateCard(hero[0].to_string()));
    }
    if iterations == 0 {
        return Err(PokerError::InvalidIterations(iterations));
    }
    Ok(())
}

fn underflow(err: PokerError) -> PokerError {
    PokerError::DeckUnderflow(err.to_string())
}

/// One attempt. `None` when the opponent folds their hole cards.
fn play_attempt<S: Shuffler + ?Sized>(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    source: &mut S,
) -> PokerResult<Option<Ordering>> {
    let mut deck = Deck::new();
    deck.remove(hero).shuffle(source);

    let villain: [Card; 2] = deck.deal_array().map_err(underflow)?;
    if !profile.would_play(&villain) {
        return Ok(None);
    }
    let board: [Card; 5] = deck.deal_array().map_err(underflow)?;
    Ok(Some(showdown(hero, &villain, &board)))
}

/// Deals tried before giving up on `iterations` hands. Saturates at `u64::MAX`.
fn attempt_cap(iterations: u64) -> u64 {
    iterations.saturating_mul(ATTEMPTS_PER_ITERATION)
}

fn run_attempts<S, F>(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    source: &mut S,
    mut on_progress: F,
) -> PokerResult<SimulationResult>
where
    S: Shuffler + ?Sized,
    F: FnMut(&SimulationResult),
{
    let max_attempts = attempt_cap(iterations);
    let progress_every = (iterations / 10).max(1);
    let mut result = SimulationResult::default();

    while result.hands_played < iterations && result.attempts < max_attempts {
        result.attempts += 1;
        let outcome = match play_attempt(hero, profile, source)? {
            Some(outcome) => outcome,
            None => continue,
        };
        match outcome {
            Ordering::Greater => result.wins += 1,
            Ordering::Equal => result.ties += 1,
            Ordering::Less => {}
        }
        result.hands_played += 1;

        if result.hands_played % progress_every == 0 {
            on_progress(&result);
        }
    }

    if result.is_exhausted(iterations) {
        log::warn!(
            "attempt cap of {} reached with {}/{} hands played against {}",
            max_attempts,
            result.hands_played,
            iterations,
            profile.name,
        );
    }
    Ok(result)
}

/// Runs the attempt loop on `source` until `iterations` hands are played or
/// `iterations * ATTEMPTS_PER_ITERATION` deals have been tried.
pub fn simulate<S: Shuffler + ?Sized>(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    source: &mut S,
) -> PokerResult<SimulationResult> {
    simulate_with_progress(hero, profile, iterations, source, |_| {})
}

/// Like [`simulate`], calling `on_progress` with the running tally every
/// tenth of `iterations` played hands.
pub fn simulate_with_progress<S, F>(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    source: &mut S,
    on_progress: F,
) -> PokerResult<SimulationResult>
where
    S: Shuffler + ?Sized,
    F: FnMut(&SimulationResult),
{
    check_inputs(hero, iterations)?;
    log::debug!(
        "simulating {}{} vs {} ({}% range), {} iterations",
        hero[0],
        hero[1],
        profile.name,
        profile.range_percent,
        iterations,
    );
    let result = run_attempts(hero, profile, iterations, source, on_progress)?;
    log::info!("{}{} vs {}: {}", hero[0], hero[1], profile.name, result);
    Ok(result)
}

pub fn simulate_seeded(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    seed: u64,
) -> PokerResult<SimulationResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    simulate(hero, profile, iterations, &mut rng)
}

/// Splits `iterations` across `workers`, each with its own `StdRng` seeded
/// from `seed` plus the worker index and its own attempt cap, then sums.
pub fn simulate_parallel(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    seed: u64,
    workers: usize,
) -> PokerResult<SimulationResult> {
    check_inputs(hero, iterations)?;
    let workers = (workers.max(1) as u64).min(iterations);
    let base = iterations / workers;
    let extra = iterations % workers;

    let parts: Vec<SimulationResult> = (0..workers)
        .into_par_iter()
        .map(|worker| {
            let share = base + u64::from(worker < extra);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(worker));
            log::debug!("worker {} running {} iterations", worker, share);
            run_attempts(hero, profile, share, &mut rng, |_| {})
        })
        .collect::<PokerResult<_>>()?;

    let result: SimulationResult = parts.into_iter().sum();
    log::info!(
        "{}{} vs {} on {} workers: {}",
        hero[0],
        hero[1],
        profile.name,
        workers,
        result,
    );
    Ok(result)
}
