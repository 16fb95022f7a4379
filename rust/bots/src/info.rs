//! Read-only helpers over a [`GameState`] for strategy code.

use arena_engine::cards::Card;
use arena_engine::game::GameState;
use arena_engine::hand::{evaluate, Category};

/// Pot odds as `pot / (pot + call)`; a free decision is 1.0.
pub fn pot_odds(pot: u32, to_call: u32) -> f32 {
    if to_call == 0 {
        return 1.0;
    }
    pot as f32 / (pot as f32 + to_call as f32)
}

/// Opponents still contesting the pot.
pub fn active_opponents<'a>(state: &'a GameState, me: &str) -> Vec<&'a str> {
    state
        .active_players
        .iter()
        .map(String::as_str)
        .filter(|&name| name != me)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionInfo {
    /// Index among the players still in the hand, in seat order
    pub index: usize,
    pub players: usize,
    pub is_dealer: bool,
}

impl PositionInfo {
    /// Last third of the table.
    pub fn is_late(&self) -> bool {
        self.is_dealer || self.index * 3 >= self.players * 2
    }
}

pub fn position_info(state: &GameState, me: &str) -> Option<PositionInfo> {
    let index = state.active_players.iter().position(|n| n == me)?;
    Some(PositionInfo {
        index,
        players: state.active_players.len(),
        is_dealer: state.dealer == me,
    })
}

/// Raise target of `current_bet + pot * num / den`, clamped into `[min_bet, max_bet]`.
pub fn pot_fraction_raise(state: &GameState, num: u32, den: u32, min_bet: u32, max_bet: u32) -> u32 {
    let extra = (u64::from(state.pot) * u64::from(num) / u64::from(den.max(1))) as u32;
    state
        .current_bet
        .saturating_add(extra)
        .min(max_bet)
        .max(min_bet)
}

/// Made-hand strength on a 0-10 scale once at least a flop is out.
pub fn made_hand_strength(hole: &[Card; 2], board: &[Card]) -> Option<u8> {
    if board.len() < 3 {
        return None;
    }
    let mut cards = hole.to_vec();
    cards.extend_from_slice(board);
    let rank = evaluate(&cards).ok()?;
    let base = match rank.category {
        Category::HighCard => 1,
        Category::Pair => 3,
        Category::TwoPair => 5,
        Category::ThreeOfAKind => 6,
        Category::Straight => 7,
        Category::Flush => 8,
        Category::FullHouse => 9,
        Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
    };
    let kicker_boost = u8::from(rank.kickers[0] >= 12);
    Some((base + kicker_boost).min(10))
}
