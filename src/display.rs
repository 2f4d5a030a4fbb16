use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::equity::{Recommendation, SimulationResult};
use crate::hand_evaluator::HandRank;
use crate::opponent::OpponentProfile;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = (equity.clamp(0.0, 1.0) * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn board_display(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| {
            let text = card.pretty();
            match card.suit {
                Suit::Spades => text.white().to_string(),
                Suit::Hearts => text.red().to_string(),
                Suit::Diamonds => text.blue().to_string(),
                Suit::Clubs => text.green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn styled_recommendation(rec: Recommendation) -> String {
    let label = rec.to_string();
    match rec {
        Recommendation::Raise => label.red().bold().to_string(),
        Recommendation::Call => label.green().bold().to_string(),
        Recommendation::Fold => label.dimmed().bold().to_string(),
    }
}

pub fn results_table(result: &SimulationResult) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new(""), Cell::new("")]);

    let pct = |rate: Option<f64>| rate.map_or("-".to_string(), |r| format!("{:.1}%", r));
    table.add_row(vec![
        Cell::new("Win".bold().to_string()),
        Cell::new(pct(result.win_rate())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Tie".bold().to_string()),
        Cell::new(pct(result.tie_rate())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Lose".bold().to_string()),
        Cell::new(pct(result.loss_rate())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Hands".bold().to_string()),
        Cell::new(result.hands_played).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Attempts".bold().to_string()),
        Cell::new(result.attempts).set_alignment(CellAlignment::Right),
    ]);
    table.to_string()
}

/// Full summary for one run, shared by the one-shot command and `play`.
pub fn render_results(hero: &[Card; 2], profile: &OpponentProfile, result: &SimulationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "SIMULATION RESULTS".cyan().bold()));
    out.push_str(&format!(
        "  {} vs {} ({}% range)\n",
        board_display(hero),
        profile.name.bold(),
        profile.range_percent,
    ));

    match (result.equity(), result.recommendation()) {
        (Some(equity), Some(rec)) => {
            out.push_str(&format!("  Equity: {}\n", equity_bar(equity, 30)));
            out.push_str(&format!("{}\n", results_table(result)));
            out.push_str(&format!("  Recommendation: {}\n", styled_recommendation(rec)));
            out.push_str(&format!("  Advice: {}\n", rec.advice()));
        }
        _ => {
            out.push_str(&format!("  {}\n", "No valid hands were played in the simulation.".yellow()));
            out.push_str("  This might happen with very tight opponent ranges.\n");
        }
    }
    out
}

pub fn roster_table(roster: &[OpponentProfile]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Opponent"),
        Cell::new("Range").set_alignment(CellAlignment::Right),
    ]);
    for (i, profile) in roster.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(profile.name.bold().to_string()),
            Cell::new(format!("{}%", profile.range_percent)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn hand_rank_display(rank: &HandRank) -> String {
    let ranks: Vec<String> = rank.tiebreakers().iter().map(|r| r.to_string()).collect();
    format!("{}  [{}]", rank.category().to_string().bold(), ranks.join(", "))
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
