//! # arena-engine: Hold'em Bot Tournament Core
//!
//! Runs no-limit Texas Hold'em freeze-out tournaments between untrusted bots.
//! The betting engine is deterministic for a given seed; every bot decision
//! goes through a sandbox that enforces a deadline and turns misbehavior into
//! a fold.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded 52-card deck on a ChaCha20 stream
//! - [`hand`] - Hand evaluation and comparison
//! - [`player`] - Player state, actions, reliability counters
//! - [`rules`] - Legal-action computation and validation
//! - [`pot`] - Main and side pot layering and payout
//! - [`game`] - Rounds, bot-facing snapshots, hand results
//! - [`engine`] - Per-hand betting state machine
//! - [`bot`] - The bot trait and bot handles
//! - [`sandbox`] - Deadline-bounded, fault-isolated bot calls
//! - [`tournament`] - Settings, blind schedule, hand sequencing, standings
//! - [`logger`] - Hand summaries and JSONL hand history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_engine::cards::parse_cards;
//! use arena_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("AS KS QS JS TS 2H 3D").unwrap();
//! let rank = evaluate(&cards).unwrap();
//! assert_eq!(rank.category, Category::RoyalFlush);
//! ```
//!
//! ## Running a Tournament
//!
//! ```rust
//! use arena_engine::bot::{Bot, BotError, BotHandle};
//! use arena_engine::cards::Card;
//! use arena_engine::game::{GameState, HandResult};
//! use arena_engine::player::{Action, ActionKind};
//! use arena_engine::tournament::{Tournament, TournamentSettings};
//!
//! struct Shover(&'static str);
//!
//! impl Bot for Shover {
//!     fn name(&self) -> &str {
//!         self.0
//!     }
//!     fn get_action(
//!         &mut self,
//!         _: &GameState,
//!         _: &[Card; 2],
//!         legal: &[ActionKind],
//!         _: u32,
//!         _: u32,
//!     ) -> Result<Action, BotError> {
//!         if legal.contains(&ActionKind::AllIn) {
//!             Ok(Action::AllIn)
//!         } else {
//!             Ok(Action::Check)
//!         }
//!     }
//!     fn hand_complete(&mut self, _: &GameState, _: &HandResult) -> Result<(), BotError> {
//!         Ok(())
//!     }
//! }
//!
//! let settings = TournamentSettings {
//!     seed: Some(42),
//!     max_hands: Some(200),
//!     ..Default::default()
//! };
//! let bots = vec![BotHandle::new(Shover("a")), BotHandle::new(Shover("b"))];
//! let mut tournament = Tournament::new(settings, bots).unwrap();
//! let result = tournament.run().unwrap();
//! assert_eq!(result.standings.len(), 2);
//! ```

pub mod bot;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod sandbox;
pub mod tournament;
