use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Payload-free action tag, used for legal-action sets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        };
        f.write_str(s)
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing to call)
    Check,
    /// Call the current bet
    Call,
    /// Raise to the given **total** bet level for this round
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn => ActionKind::AllIn,
        }
    }

    /// Raise target for `Raise`, 0 for everything else.
    pub fn amount(&self) -> u32 {
        match self {
            Action::Raise(total) => *total,
            _ => 0,
        }
    }
}

/// Where a player stands within the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Still contesting the pot and able to act
    Active,
    /// Gave up the hand; no pot eligibility
    Folded,
    /// Every chip is committed; contests pots but never acts again this hand
    AllIn,
    /// Not dealt into this hand (busted or removed)
    Out,
}

/// Per-bot fault bookkeeping, updated by the sandbox.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    pub timeouts: u32,
    pub errors: u32,
    pub invalid_actions: u32,
    pub disqualified: bool,
}

impl Reliability {
    pub fn faults(&self) -> u32 {
        self.timeouts + self.errors + self.invalid_actions
    }
}

/// A seated tournament player: chip stack plus the per-hand betting state.
///
/// The tournament owns every `Player`; the betting engine only borrows the
/// table for the duration of a call.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    stack: u32,
    status: PlayerStatus,
    round_bet: u32,
    hand_bet: u32,
    hole: [Option<Card>; 2],
    seated: bool,
    pub reliability: Reliability,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            status: PlayerStatus::Out,
            round_bet: 0,
            hand_bet: 0,
            hole: [None, None],
            seated: true,
            reliability: Reliability::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn round_bet(&self) -> u32 {
        self.round_bet
    }
    pub fn hand_bet(&self) -> u32 {
        self.hand_bet
    }

    /// True while the player may still win chips in this hand.
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// False once the player busted or was removed from the tournament.
    pub fn is_seated(&self) -> bool {
        self.seated
    }

    pub(crate) fn leave_table(&mut self) {
        self.seated = false;
        self.status = PlayerStatus::Out;
    }

    pub fn is_disqualified(&self) -> bool {
        self.reliability.disqualified
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    pub(crate) fn set_hole(&mut self, cards: [Card; 2]) {
        self.hole = [Some(cards[0]), Some(cards[1])];
    }

    /// Clears per-hand state; seated players with chips are dealt in.
    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = [None, None];
        self.round_bet = 0;
        self.hand_bet = 0;
        self.status = if self.seated && self.stack > 0 {
            PlayerStatus::Active
        } else {
            PlayerStatus::Out
        };
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_bet = 0;
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves up to `amount` chips from the stack into the pot; returns what was paid.
    /// Paying the last chip flips the player to all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.round_bet += paid;
        self.hand_bet += paid;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }
}
