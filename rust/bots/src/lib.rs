//! # arena-bots: Built-in Tournament Bots
//!
//! Ready-made strategies implementing [`arena_engine::bot::Bot`], helpers
//! over the bot-facing game snapshot, and roster loading.
//!
//! ## Strategies
//!
//! - `"random"` - uniformly random legal actions
//! - `"conservative"` - tight: premium hands only
//! - `"aggressive"` - loose, raises often
//! - `"baseline"` - deterministic rule-based reference
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_bots::roster::{into_handles, load_roster};
//! use arena_engine::tournament::{Tournament, TournamentSettings};
//!
//! let entries = vec!["alice=baseline".to_string(), "bob=aggressive".to_string()];
//! let bots = into_handles(load_roster(&entries, Some(3))).unwrap();
//! let settings = TournamentSettings {
//!     seed: Some(3),
//!     max_hands: Some(25),
//!     ..Default::default()
//! };
//! let result = Tournament::new(settings, bots).unwrap().run().unwrap();
//! assert!(result.hands_played <= 25);
//! ```

use arena_engine::bot::Bot;

pub mod aggressive;
pub mod baseline;
pub mod conservative;
pub mod info;
pub mod random;
pub mod roster;

use roster::RosterError;

pub(crate) const STRATEGIES: &[(&str, &str)] = &[
    ("aggressive", "loose-aggressive, raises often and adapts to results"),
    ("baseline", "deterministic rule-based reference player"),
    ("conservative", "tight, plays only premium starting hands"),
    ("random", "uniformly random legal actions"),
];

/// Creates a bot of the given strategy.
///
/// `seed` makes randomized strategies reproducible; deterministic ones ignore it.
///
/// # Example
///
/// ```rust
/// use arena_bots::create_bot;
///
/// let bot = create_bot("baseline", "ref", None).unwrap();
/// assert_eq!(bot.name(), "ref");
/// assert!(create_bot("psychic", "x", None).is_err());
/// ```
pub fn create_bot(strategy: &str, name: &str, seed: Option<u64>) -> Result<Box<dyn Bot>, RosterError> {
    match strategy {
        "random" => Ok(Box::new(random::RandomBot::new(name, seed))),
        "conservative" => Ok(Box::new(conservative::ConservativeBot::new(name))),
        "aggressive" => Ok(Box::new(aggressive::AggressiveBot::new(name, seed))),
        "baseline" => Ok(Box::new(baseline::BaselineBot::new(name))),
        other => Err(RosterError::UnknownStrategy {
            strategy: other.to_string(),
            available: STRATEGIES
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}
