use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cards::{parse_cards, parse_hole_cards, Card};
use crate::display::{board_display, hand_rank_display, print_error, print_section, render_results, roster_table};
use crate::equity::{simulate_parallel, simulate_with_progress, SimulationResult, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::PokerResult;
use crate::hand_evaluator::{best_hand, HandRank};
use crate::opponent::{default_roster, find_opponent, load_roster, OpponentProfile};
use crate::play::run_interactive_session;

#[derive(Parser)]
#[command(
    name = "mcpoker",
    version = "1.0.0",
    about = "Monte Carlo poker equity against a modelled opponent range."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate equity of a starting hand against an opponent
    Simulate {
        /// Your hole cards (e.g., AsKs)
        hand: String,
        /// Opponent from the roster, by name or number
        #[arg(short, long, conflicts_with = "range")]
        opponent: Option<String>,
        /// Custom opponent range in percent (0-100)
        #[arg(short, long)]
        range: Option<f64>,
        /// Number of hands to simulate
        #[arg(
            short = 'n',
            long,
            env = "MCPOKER_ITERATIONS",
            default_value = "1000",
            value_parser = clap::value_parser!(u64).range(MIN_ITERATIONS..=MAX_ITERATIONS)
        )]
        iterations: u64,
        /// Seed for reproducible runs
        #[arg(long, env = "MCPOKER_SEED")]
        seed: Option<u64>,
        /// Worker threads; more than one runs the simulation in parallel
        #[arg(short, long, env = "MCPOKER_THREADS", default_value = "1")]
        threads: usize,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Opponent roster JSON file
        #[arg(long, env = "MCPOKER_ROSTER")]
        roster: Option<PathBuf>,
    },
    /// List the opponent roster
    Opponents {
        /// Opponent roster JSON file
        #[arg(long, env = "MCPOKER_ROSTER")]
        roster: Option<PathBuf>,
    },
    /// Best five-card hand out of seven cards
    Eval {
        /// Seven cards (e.g., AsKsQsJsTs2h3d)
        cards: String,
    },
    /// Interactive simulator
    Play {
        /// Seed for reproducible runs
        #[arg(long, env = "MCPOKER_SEED")]
        seed: Option<u64>,
        /// Opponent roster JSON file
        #[arg(long, env = "MCPOKER_ROSTER")]
        roster: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    let outcome = match cli.command {
        Commands::Simulate {
            hand,
            opponent,
            range,
            iterations,
            seed,
            threads,
            json,
            roster,
        } => cmd_simulate(hand, opponent, range, iterations, seed, threads, json, roster),
        Commands::Opponents { roster } => cmd_opponents(roster),
        Commands::Eval { cards } => cmd_eval(cards),
        Commands::Play { seed, roster } => cmd_play(seed, roster),
    };
    if let Err(e) = outcome {
        print_error(&e.to_string());
        process::exit(1);
    }
}

fn resolve_roster(path: Option<PathBuf>) -> PokerResult<Vec<OpponentProfile>> {
    match path {
        Some(p) => load_roster(&p),
        None => Ok(default_roster().to_vec()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// A custom range wins over the roster; with neither, the first roster entry.
fn resolve_profile(
    opponent: Option<String>,
    range: Option<f64>,
    roster: Option<PathBuf>,
) -> PokerResult<OpponentProfile> {
    if let Some(pct) = range {
        return OpponentProfile::new(format!("Custom {}%", pct), pct);
    }
    let roster = resolve_roster(roster)?;
    let key = opponent.unwrap_or_else(|| "1".to_string());
    Ok(find_opponent(&roster, &key)?.clone())
}

fn simulation_report(
    hero: &[Card; 2],
    profile: &OpponentProfile,
    iterations: u64,
    result: &SimulationResult,
) -> serde_json::Value {
    serde_json::json!({
        "hand": [hero[0].to_string(), hero[1].to_string()],
        "opponent": profile,
        "iterations": iterations,
        "result": result,
        "win_rate": result.win_rate(),
        "tie_rate": result.tie_rate(),
        "loss_rate": result.loss_rate(),
        "recommendation": result.recommendation(),
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_simulate(
    hand: String,
    opponent: Option<String>,
    range: Option<f64>,
    iterations: u64,
    seed: Option<u64>,
    threads: usize,
    json: bool,
    roster: Option<PathBuf>,
) -> PokerResult<()> {
    let hero = parse_hole_cards(&hand)?;
    let profile = resolve_profile(opponent, range, roster)?;

    let result = if threads > 1 {
        let seed = seed.unwrap_or_else(rand::random);
        simulate_parallel(&hero, &profile, iterations, seed, threads)?
    } else {
        let mut rng = make_rng(seed);
        if !json {
            println!("\n  Running {} simulations...", format!("{}", iterations).bold());
        }
        simulate_with_progress(&hero, &profile, iterations, &mut rng, |tally| {
            if !json {
                let pct = tally.hands_played as f64 / iterations as f64 * 100.0;
                println!("  Progress: {:.0}% ({}/{} hands)", pct, tally.hands_played, iterations);
            }
        })?
    };

    if json {
        let report = simulation_report(&hero, &profile, iterations, &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_results(&hero, &profile, &result));
        println!();
    }
    Ok(())
}

fn cmd_opponents(roster: Option<PathBuf>) -> PokerResult<()> {
    let roster = resolve_roster(roster)?;
    println!("{}", roster_table(&roster));
    Ok(())
}

fn evaluate_cards(notation: &str) -> PokerResult<(Vec<Card>, HandRank)> {
    let cards = parse_cards(notation)?;
    let rank = best_hand(&cards)?;
    Ok((cards, rank))
}

fn cmd_eval(cards: String) -> PokerResult<()> {
    let (cards, rank) = evaluate_cards(&cards)?;
    print_section("Cards", &board_display(&cards));
    print_section("Best hand", &hand_rank_display(&rank));
    println!();
    Ok(())
}

fn cmd_play(seed: Option<u64>, roster: Option<PathBuf>) -> PokerResult<()> {
    let roster = resolve_roster(roster)?;
    let mut rng = make_rng(seed);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(&roster, &mut rng, &mut reader, &mut writer);
    Ok(())
}
