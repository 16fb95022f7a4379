use thiserror::Error;

use crate::player::ActionKind;

/// Errors raised by the card model and the betting engine.
///
/// Evaluation and parsing errors are ordinary input errors. Everything from
/// `NotPlayersTurn` down is an engine invariant violation: the sandbox only
/// hands the engine validated actions, so seeing one of these means the state
/// machine itself is broken and the tournament must stop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Hand evaluation needs at least 5 cards, got {0}")]
    NotEnoughCards(usize),
    #[error("Hand evaluation takes at most 7 cards, got {0}")]
    TooManyCards(usize),
    #[error("Duplicate card in hand: {0}")]
    DuplicateCard(String),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Need at least 2 players with chips to start a hand, got {0}")]
    NotEnoughPlayers(usize),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Hand is not finished yet")]
    HandNotFinished,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Illegal action: {0}")]
    IllegalAction(ActionKind),
    #[error("Invalid bet amount: {amount}, allowed range {minimum}..={maximum}")]
    InvalidBetAmount {
        amount: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Chip ledger mismatch: {before} chips before the hand, {after} after")]
    ChipLedgerMismatch { before: u64, after: u64 },
}
