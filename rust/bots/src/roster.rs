//! Turning `name=strategy` entries into bot handles.

use std::collections::HashSet;

use thiserror::Error;

use arena_engine::bot::BotHandle;

use crate::{create_bot, STRATEGIES};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("entry {0:?} is not of the form name=strategy")]
    Malformed(String),
    #[error("unknown strategy {strategy:?} (available: {available})")]
    UnknownStrategy { strategy: String, available: String },
    #[error("duplicate bot name {0:?}")]
    DuplicateName(String),
}

/// One roster line and whether it produced a usable bot.
#[derive(Debug)]
pub struct RosterEntry {
    pub name: String,
    pub strategy: String,
    pub bot: Result<BotHandle, RosterError>,
}

impl RosterEntry {
    pub fn is_valid(&self) -> bool {
        self.bot.is_ok()
    }

    /// Human-readable validity, for listings.
    pub fn reason(&self) -> String {
        match &self.bot {
            Ok(_) => "ok".to_string(),
            Err(e) => e.to_string(),
        }
    }
}

/// Splits `name=strategy`; a bare `strategy` is named after itself.
pub fn parse_entry(entry: &str) -> Result<(String, String), RosterError> {
    let entry = entry.trim();
    let (name, strategy) = match entry.split_once('=') {
        Some((name, strategy)) => (name.trim(), strategy.trim()),
        None => (entry, entry),
    };
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_name || strategy.is_empty() {
        return Err(RosterError::Malformed(entry.to_string()));
    }
    Ok((name.to_string(), strategy.to_ascii_lowercase()))
}

/// Builds one entry per line. Seeded strategies get `seed + index` so a
/// seeded tournament replays exactly.
pub fn load_roster(entries: &[String], seed: Option<u64>) -> Vec<RosterEntry> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let (name, strategy) = match parse_entry(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    return RosterEntry {
                        name: raw.clone(),
                        strategy: String::new(),
                        bot: Err(e),
                    }
                }
            };
            let bot = if seen.insert(name.clone()) {
                let bot_seed = seed.map(|s| s.wrapping_add(i as u64));
                create_bot(&strategy, &name, bot_seed).map(|b| BotHandle::with_name(name.clone(), b))
            } else {
                Err(RosterError::DuplicateName(name.clone()))
            };
            RosterEntry {
                name,
                strategy,
                bot,
            }
        })
        .collect()
}

/// Handles of a fully valid roster, or the first problem found.
pub fn into_handles(entries: Vec<RosterEntry>) -> Result<Vec<BotHandle>, RosterError> {
    entries.into_iter().map(|e| e.bot).collect()
}

/// Strategy names with one-line descriptions.
pub fn available_strategies() -> &'static [(&'static str, &'static str)] {
    STRATEGIES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_named_and_bare_entries() {
        assert_eq!(
            parse_entry("alice=Random").unwrap(),
            ("alice".to_string(), "random".to_string())
        );
        assert_eq!(
            parse_entry("baseline").unwrap(),
            ("baseline".to_string(), "baseline".to_string())
        );
        assert!(matches!(parse_entry("=random"), Err(RosterError::Malformed(_))));
        assert!(matches!(parse_entry("bad name=random"), Err(RosterError::Malformed(_))));
    }

    #[test]
    fn reports_each_problem_with_a_reason() {
        let roster = load_roster(&lines(&["a=random", "b=telepathic", "a=baseline"]), Some(1));
        assert!(roster[0].is_valid());
        assert_eq!(roster[0].reason(), "ok");
        assert!(roster[1].reason().contains("unknown strategy"));
        assert_eq!(roster[2].bot.as_ref().unwrap_err(), &RosterError::DuplicateName("a".into()));
        assert!(into_handles(roster).is_err());
    }

    #[test]
    fn valid_roster_yields_named_handles() {
        let roster = load_roster(&lines(&["x=aggressive", "y=conservative"]), None);
        let handles = into_handles(roster).unwrap();
        let names: Vec<&str> = handles.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
