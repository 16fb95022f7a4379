//! The decision interface every bot implements.
//!
//! Bots are untrusted. The tournament never calls a [`Bot`] directly; every
//! call goes through [`crate::sandbox::Sandbox`], which runs it on a worker
//! thread under a deadline and turns failures into forced folds.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::cards::Card;
use crate::game::{GameState, HandResult};
use crate::player::{Action, ActionKind};
use crate::tournament::Standing;

/// Failure reported by (or caught around) a bot call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BotError {
    #[error("{0}")]
    Failed(String),
    #[error("bot panicked: {0}")]
    Panicked(String),
}

impl BotError {
    pub fn msg(message: impl Into<String>) -> Self {
        BotError::Failed(message.into())
    }
}

/// Trait defining a tournament bot.
///
/// # Required Methods
///
/// - [`get_action`](Bot::get_action) - pick an action for the current decision
/// - [`hand_complete`](Bot::hand_complete) - observe a finished hand
/// - [`name`](Bot::name) - display name
///
/// # Example Implementation
///
/// ```rust
/// use arena_engine::bot::{Bot, BotError};
/// use arena_engine::cards::Card;
/// use arena_engine::game::{GameState, HandResult};
/// use arena_engine::player::{Action, ActionKind};
///
/// struct Caller;
///
/// impl Bot for Caller {
///     fn name(&self) -> &str {
///         "caller"
///     }
///
///     fn get_action(
///         &mut self,
///         _state: &GameState,
///         _hole: &[Card; 2],
///         legal: &[ActionKind],
///         _min_bet: u32,
///         _max_bet: u32,
///     ) -> Result<Action, BotError> {
///         if legal.contains(&ActionKind::Check) {
///             Ok(Action::Check)
///         } else {
///             Ok(Action::Call)
///         }
///     }
///
///     fn hand_complete(&mut self, _state: &GameState, _result: &HandResult) -> Result<(), BotError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Bot: Send {
    fn name(&self) -> &str;

    /// Choose an action. A `Raise` names the total round bet, which must lie
    /// within `[min_bet, max_bet]`.
    fn get_action(
        &mut self,
        state: &GameState,
        hole_cards: &[Card; 2],
        legal: &[ActionKind],
        min_bet: u32,
        max_bet: u32,
    ) -> Result<Action, BotError>;

    fn hand_complete(&mut self, state: &GameState, result: &HandResult) -> Result<(), BotError>;

    fn tournament_start(&mut self, _players: &[String], _starting_chips: u32) -> Result<(), BotError> {
        Ok(())
    }

    fn tournament_end(&mut self, _standings: &[Standing]) -> Result<(), BotError> {
        Ok(())
    }
}

/// A bot as seen by the tournament: display name, the shared bot object and
/// a counter of how many times it was actually invoked.
#[derive(Clone)]
pub struct BotHandle {
    name: String,
    bot: Arc<Mutex<Box<dyn Bot>>>,
    calls: Arc<AtomicUsize>,
}

impl BotHandle {
    /// Handle named after the bot itself.
    pub fn new<B: Bot + 'static>(bot: B) -> Self {
        let name = bot.name().to_string();
        Self::with_name(name, Box::new(bot))
    }

    /// Handle with a display name chosen by the roster.
    pub fn with_name(name: impl Into<String>, bot: Box<dyn Bot>) -> Self {
        Self {
            name: name.into(),
            bot: Arc::new(Mutex::new(bot)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bot invocations so far, notifications included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn shared(&self) -> Arc<Mutex<Box<dyn Bot>>> {
        Arc::clone(&self.bot)
    }

    pub(crate) fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl fmt::Debug for BotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotHandle")
            .field("name", &self.name)
            .field("calls", &self.calls())
            .finish()
    }
}
