//! Deadline-bounded, fault-isolated bot calls.
//!
//! Each call runs on its own OS thread while the caller waits on a channel
//! with `recv_timeout`. A bot that ignores the deadline cannot be stopped, so
//! its thread is left behind: the receiver is dropped and whatever it sends
//! later goes nowhere. While such an orphaned call still holds the bot, new
//! calls to the same bot fail fast instead of queueing behind it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::TryLockError;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bot::{Bot, BotError, BotHandle};
use crate::cards::Card;
use crate::game::{GameState, HandResult};
use crate::player::{Action, Reliability};
use crate::rules::{validate_action, LegalActions};
use crate::tournament::Standing;

/// How a decision came about.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The bot answered in time with a legal action
    Acted,
    Timeout,
    /// The bot returned an error or panicked
    Error,
    /// The bot answered with an action outside the legal set
    Invalid,
    /// The bot was not asked at all
    Disqualified,
}

impl DecisionOutcome {
    /// True for outcomes that count toward disqualification.
    pub fn is_fault(self) -> bool {
        matches!(
            self,
            DecisionOutcome::Timeout | DecisionOutcome::Error | DecisionOutcome::Invalid
        )
    }
}

/// A normalized decision, always legal for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    /// Raise target, 0 otherwise
    pub amount: u32,
    pub outcome: DecisionOutcome,
    pub detail: Option<String>,
}

impl Decision {
    fn acted(action: Action) -> Self {
        Self {
            action,
            amount: action.amount(),
            outcome: DecisionOutcome::Acted,
            detail: None,
        }
    }

    fn forced_fold(outcome: DecisionOutcome, detail: Option<String>) -> Self {
        Self {
            action: Action::Fold,
            amount: 0,
            outcome,
            detail,
        }
    }
}

enum CallOutcome<T> {
    Done(T),
    Failed(String),
    TimedOut,
    /// An earlier call is still running inside the bot
    Busy,
}

enum WorkerFault {
    Bot(BotError),
    Busy,
}

#[derive(Debug, Clone, Copy)]
pub struct Sandbox {
    time_limit: Duration,
    max_faults: u32,
}

impl Sandbox {
    /// `max_faults` is the number of faults a bot may accumulate; the next
    /// one disqualifies it.
    pub fn new(time_limit: Duration, max_faults: u32) -> Self {
        Self {
            time_limit,
            max_faults,
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Asks a bot for its action and normalizes the answer.
    ///
    /// Never fails: timeouts, errors, panics and illegal answers all become a
    /// `Fold` with the matching counter in `reliability` incremented.
    /// Disqualified bots fold without being invoked.
    pub fn request_action(
        &self,
        handle: &BotHandle,
        reliability: &mut Reliability,
        state: &GameState,
        hole_cards: [Card; 2],
        legal: &LegalActions,
    ) -> Decision {
        if reliability.disqualified {
            return Decision::forced_fold(DecisionOutcome::Disqualified, None);
        }

        let state = state.clone();
        let kinds = legal.actions.clone();
        let (min_bet, max_bet) = (legal.min_bet, legal.max_bet);
        let outcome = self.call(handle, move |bot| {
            bot.get_action(&state, &hole_cards, &kinds, min_bet, max_bet)
        });

        let decision = match outcome {
            CallOutcome::Done(action) => match validate_action(legal, action) {
                Ok(action) => Decision::acted(action),
                Err(e) => {
                    reliability.invalid_actions += 1;
                    warn!(bot = %handle.name(), action = ?action, error = %e, "Invalid action, folding");
                    Decision::forced_fold(DecisionOutcome::Invalid, Some(e.to_string()))
                }
            },
            CallOutcome::Failed(message) => {
                reliability.errors += 1;
                warn!(bot = %handle.name(), error = %message, "Bot failed, folding");
                Decision::forced_fold(DecisionOutcome::Error, Some(message))
            }
            CallOutcome::TimedOut => {
                reliability.timeouts += 1;
                warn!(bot = %handle.name(), limit = ?self.time_limit, "Bot timed out, folding");
                Decision::forced_fold(DecisionOutcome::Timeout, None)
            }
            CallOutcome::Busy => {
                reliability.timeouts += 1;
                warn!(bot = %handle.name(), "Bot still busy with an abandoned call, folding");
                Decision::forced_fold(
                    DecisionOutcome::Timeout,
                    Some("previous call still running".to_string()),
                )
            }
        };

        if decision.outcome.is_fault() && reliability.faults() > self.max_faults {
            reliability.disqualified = true;
            warn!(
                bot = %handle.name(),
                timeouts = reliability.timeouts,
                errors = reliability.errors,
                invalid = reliability.invalid_actions,
                "Bot disqualified"
            );
        }
        decision
    }

    pub fn notify_hand_complete(
        &self,
        handle: &BotHandle,
        reliability: &Reliability,
        state: &GameState,
        result: &HandResult,
    ) {
        if reliability.disqualified {
            return;
        }
        let state = state.clone();
        let result = result.clone();
        let outcome = self.call(handle, move |bot| bot.hand_complete(&state, &result));
        log_notification(handle, "hand_complete", outcome);
    }

    pub fn notify_tournament_start(
        &self,
        handle: &BotHandle,
        reliability: &Reliability,
        players: &[String],
        starting_chips: u32,
    ) {
        if reliability.disqualified {
            return;
        }
        let players = players.to_vec();
        let outcome = self.call(handle, move |bot| {
            bot.tournament_start(&players, starting_chips)
        });
        log_notification(handle, "tournament_start", outcome);
    }

    pub fn notify_tournament_end(
        &self,
        handle: &BotHandle,
        reliability: &Reliability,
        standings: &[Standing],
    ) {
        if reliability.disqualified {
            return;
        }
        let standings = standings.to_vec();
        let outcome = self.call(handle, move |bot| bot.tournament_end(&standings));
        log_notification(handle, "tournament_end", outcome);
    }

    fn call<T, F>(&self, handle: &BotHandle, f: F) -> CallOutcome<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn Bot) -> Result<T, BotError> + Send + 'static,
    {
        let bot = handle.shared();
        let calls = handle.counter();
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(format!("bot-{}", handle.name()))
            .spawn(move || {
                let result = match bot.try_lock() {
                    Ok(mut guard) => {
                        calls.fetch_add(1, Ordering::SeqCst);
                        run_guarded(&mut **guard, f)
                    }
                    // a panic escaped an earlier call; the bot is still usable
                    Err(TryLockError::Poisoned(poisoned)) => {
                        let mut guard = poisoned.into_inner();
                        calls.fetch_add(1, Ordering::SeqCst);
                        run_guarded(&mut **guard, f)
                    }
                    Err(TryLockError::WouldBlock) => Err(WorkerFault::Busy),
                };
                // the receiver is gone after a timeout
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            return CallOutcome::Failed(format!("could not start bot thread: {e}"));
        }

        match rx.recv_timeout(self.time_limit) {
            Ok(Ok(value)) => CallOutcome::Done(value),
            Ok(Err(WorkerFault::Bot(e))) => CallOutcome::Failed(e.to_string()),
            Ok(Err(WorkerFault::Busy)) => CallOutcome::Busy,
            Err(RecvTimeoutError::Timeout) => CallOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => {
                CallOutcome::Failed("bot thread exited without answering".to_string())
            }
        }
    }
}

fn run_guarded<T, F>(bot: &mut dyn Bot, f: F) -> Result<T, WorkerFault>
where
    F: FnOnce(&mut dyn Bot) -> Result<T, BotError>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| f(bot))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(WorkerFault::Bot(e)),
        Err(payload) => Err(WorkerFault::Bot(BotError::Panicked(panic_message(payload.as_ref())))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn log_notification(handle: &BotHandle, hook: &str, outcome: CallOutcome<()>) {
    match outcome {
        CallOutcome::Done(()) => {}
        CallOutcome::Failed(message) => {
            warn!(bot = %handle.name(), hook, error = %message, "Notification failed")
        }
        CallOutcome::TimedOut => warn!(bot = %handle.name(), hook, "Notification timed out"),
        CallOutcome::Busy => warn!(bot = %handle.name(), hook, "Notification skipped, bot busy"),
    }
}
