use std::io::{BufRead, Write};

use colored::Colorize;

use crate::cards::{parse_hole_cards, Card, Shuffler};
use crate::display::{render_results, roster_table};
use crate::equity::{simulate_with_progress, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::{PokerError, PokerResult};
use crate::opponent::{find_opponent, OpponentProfile};

/// Invalid answers tolerated per prompt before the hand is abandoned.
pub const MAX_PROMPT_TRIES: usize = 3;

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

pub fn parse_hole_input(text: &str) -> PokerResult<[Card; 2]> {
    parse_hole_cards(text)
}

pub fn parse_opponent_input<'a>(text: &str, roster: &'a [OpponentProfile]) -> PokerResult<&'a OpponentProfile> {
    find_opponent(roster, text)
}

pub fn parse_iterations_input(text: &str) -> PokerResult<u64> {
    let digits = text.trim().replace(['_', ','], "");
    let n: u64 = digits
        .parse()
        .map_err(|_| PokerError::InvalidNumber(text.trim().to_string()))?;
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&n) {
        return Err(PokerError::InvalidIterations(n));
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Prompting
// ---------------------------------------------------------------------------

enum Stop {
    Quit,
    Abandon,
}

/// `None` on EOF, read error, or `q`.
fn prompt(message: &str, reader: &mut dyn BufRead, writer: &mut dyn Write) -> Option<String> {
    write!(writer, "{}: ", message).ok();
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

fn ask<T>(
    message: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    mut parse: impl FnMut(&str) -> PokerResult<T>,
) -> Result<T, Stop> {
    for _ in 0..MAX_PROMPT_TRIES {
        let answer = prompt(message, reader, writer).ok_or(Stop::Quit)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => {
                writeln!(writer, "  {} {}", "Invalid:".red().bold(), e).ok();
            }
        }
    }
    writeln!(writer, "  Too many invalid answers, starting over.").ok();
    Err(Stop::Abandon)
}

fn prompt_yn(message: &str, reader: &mut dyn BufRead, writer: &mut dyn Write) -> bool {
    matches!(
        prompt(&format!("{} (y/n)", message), reader, writer)
            .map(|a| a.to_lowercase())
            .as_deref(),
        Some("y") | Some("yes")
    )
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

pub fn run_interactive_session<S: Shuffler + ?Sized>(
    roster: &[OpponentProfile],
    source: &mut S,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) {
    writeln!(writer).ok();
    writeln!(writer, "{}", "POKER MONTE CARLO SIMULATOR".cyan().bold()).ok();
    writeln!(
        writer,
        "Cards are rank + suit (As = Ace of spades, Kh = King of hearts). Type {} to quit.",
        "'q'".bold()
    )
    .ok();

    loop {
        match play_one_round(roster, source, reader, writer) {
            Ok(()) | Err(Stop::Abandon) => {}
            Err(Stop::Quit) => break,
        }
        if !prompt_yn("\nRun another simulation?", reader, writer) {
            break;
        }
    }
    writeln!(writer, "\n{}\n", "Thanks for using the Poker Monte Carlo Simulator!".cyan().bold()).ok();
}

fn play_one_round<S: Shuffler + ?Sized>(
    roster: &[OpponentProfile],
    source: &mut S,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Stop> {
    let hero = ask("\n  Your hole cards (e.g. AsKh)", reader, writer, parse_hole_input)?;

    writeln!(writer, "\n  {}", "Select your opponent:".bold()).ok();
    writeln!(writer, "{}", roster_table(roster)).ok();
    let profile = ask("  Opponent (number or name)", reader, writer, |text| {
        parse_opponent_input(text, roster).cloned()
    })?;

    let iterations = ask(
        &format!("  Number of simulations ({}-{})", MIN_ITERATIONS, MAX_ITERATIONS),
        reader,
        writer,
        parse_iterations_input,
    )?;

    writeln!(writer, "\n  Running {} simulations...", iterations).ok();
    let outcome = simulate_with_progress(&hero, &profile, iterations, source, |tally| {
        let pct = tally.hands_played as f64 / iterations as f64 * 100.0;
        writeln!(
            writer,
            "  Progress: {:.0}% ({}/{} hands)",
            pct, tally.hands_played, iterations
        )
        .ok();
    });

    match outcome {
        Ok(result) => {
            write!(writer, "{}", render_results(&hero, &profile, &result)).ok();
        }
        Err(e) => {
            writeln!(writer, "  {} {}", "Error:".red().bold(), e).ok();
        }
    }
    Ok(())
}
