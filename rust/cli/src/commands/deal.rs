//! Deal command: one hand to N players, with a deck integrity check.

use std::collections::HashSet;
use std::io::Write;

use arena_engine::cards::Card;
use arena_engine::deck::Deck;

use crate::error::CliError;

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = 10;

/// Deals two hole cards to each of `players` seats and a five-card board,
/// then verifies no card repeats and `52 - 2N - 5` cards remain.
pub fn handle_deal_command(
    players: usize,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "--players must be between {} and {}, got {}",
            MIN_PLAYERS, MAX_PLAYERS, players
        )));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let mut holes = vec![Vec::with_capacity(2); players];
    for _ in 0..2 {
        for hole in holes.iter_mut() {
            hole.push(deck.draw()?);
        }
    }
    let board = (0..5).map(|_| deck.draw()).collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let dealt: Vec<Card> = holes.iter().flatten().chain(&board).copied().collect();
    let duplicates: Vec<String> = dealt
        .iter()
        .filter(|c| !seen.insert(**c))
        .map(|c| c.to_string())
        .collect();
    let expected_remaining = 52 - 2 * players - 5;

    writeln!(out, "Seed: {}", seed)?;
    for (i, hole) in holes.iter().enumerate() {
        writeln!(out, "Seat {}: {}", i + 1, join(hole))?;
    }
    writeln!(out, "Board: {}", join(&board))?;
    writeln!(out, "Remaining: {}", deck.remaining())?;

    if !duplicates.is_empty() {
        return Err(CliError::Engine(format!(
            "duplicate cards dealt: {}",
            duplicates.join(" ")
        )));
    }
    if deck.remaining() != expected_remaining {
        return Err(CliError::Engine(format!(
            "expected {} cards left in the deck, found {}",
            expected_remaining,
            deck.remaining()
        )));
    }
    writeln!(out, "Deck check: ok")?;
    Ok(())
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(players: usize, seed: u64) -> String {
        let mut out = Vec::new();
        handle_deal_command(players, Some(seed), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn same_seed_same_deal() {
        assert_eq!(deal(4, 12345), deal(4, 12345));
    }

    #[test]
    fn full_table_leaves_expected_cards() {
        let output = deal(10, 7);
        assert!(output.contains("Seat 10:"));
        assert!(output.contains("Remaining: 27"));
        assert!(output.ends_with("Deck check: ok\n"));
    }

    #[test]
    fn player_count_is_bounded() {
        let mut out = Vec::new();
        for players in [0, 1, 11] {
            assert!(matches!(
                handle_deal_command(players, Some(1), &mut out),
                Err(CliError::InvalidInput(_))
            ));
        }
    }
}
