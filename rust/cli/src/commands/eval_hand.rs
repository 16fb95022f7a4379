//! Evaluate command: rank 5 to 7 cards.

use std::io::Write;

use arena_engine::cards::{parse_cards, Card};
use arena_engine::hand::{best_five, evaluate};

use crate::error::CliError;

/// Prints the category and best five cards of the given hand.
///
/// Cards may be passed as separate arguments or in one comma/space separated
/// string; `10h` and `Th` are both accepted.
pub fn handle_eval_hand_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" ")).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let rank = evaluate(&cards).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let best = best_five(&cards)?;

    writeln!(out, "Hand: {}", join(&cards))?;
    writeln!(out, "Category: {}", rank.category)?;
    writeln!(out, "Best five: {}", join(&best))?;
    Ok(())
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
