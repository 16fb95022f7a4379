use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::Category;

/// Betting rounds of a hand, plus the two terminal states.
///
/// `Preflop → Flop → Turn → River → Showdown`; `HandOver` is reached early
/// once at most one player is left un-folded.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

impl Round {
    pub fn is_betting(self) -> bool {
        matches!(self, Round::Preflop | Round::Flop | Round::Turn | Round::River)
    }

    /// Community cards dealt when entering this round.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }

    pub fn next(self) -> Round {
        match self {
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River | Round::Showdown => Round::Showdown,
            Round::HandOver => Round::HandOver,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Round::Preflop => "preflop",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "river",
            Round::Showdown => "showdown",
            Round::HandOver => "hand_over",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

/// Read-only view of a hand handed to bots.
///
/// Always an owned snapshot: a bot can keep or mutate its copy without any
/// effect on the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub hand_number: u64,
    pub round: Round,
    pub pot: u32,
    pub community_cards: Vec<Card>,
    /// Highest round bet at the table
    pub current_bet: u32,
    /// Smallest total a raise may name right now
    pub min_raise: u32,
    pub player_chips: BTreeMap<String, u32>,
    pub player_bets: BTreeMap<String, u32>,
    /// Players not folded, in seat order
    pub active_players: Vec<String>,
    pub current_player: Option<String>,
    pub dealer: String,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl GameState {
    /// Chips `name` needs to add to match the table bet.
    pub fn to_call(&self, name: &str) -> u32 {
        let bet = self.player_bets.get(name).copied().unwrap_or(0);
        self.current_bet.saturating_sub(bet)
    }
}

/// A hand shown down at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub player: String,
    pub hole_cards: [Card; 2],
    pub category: Category,
    pub best_five: Vec<Card>,
}

/// One settled pot layer (main pot first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSummary {
    pub amount: u32,
    pub eligible: Vec<String>,
    pub winners: Vec<(String, u32)>,
}

/// Outcome of a settled hand, shared with bots through `hand_complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u64,
    pub pot_total: u32,
    pub board: Vec<Card>,
    pub pots: Vec<PotSummary>,
    /// Net chips won per winner (sum over pots)
    pub winnings: BTreeMap<String, u32>,
    /// Empty when everyone else folded
    pub showdown: Vec<ShowdownHand>,
}

impl HandResult {
    pub fn winners(&self) -> Vec<&str> {
        self.winnings.keys().map(String::as_str).collect()
    }

    pub fn went_to_showdown(&self) -> bool {
        !self.showdown.is_empty()
    }
}
