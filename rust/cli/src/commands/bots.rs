//! Bots command: list strategies or validate roster entries.

use std::io::Write;

use arena_bots::roster::{available_strategies, load_roster};

use crate::error::CliError;

/// Without `check`, lists the built-in strategies. With entries, prints one
/// validity line per entry and fails if any entry is unusable.
pub fn handle_bots_command(check: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    if check.is_empty() {
        writeln!(out, "Available strategies:")?;
        for (name, description) in available_strategies() {
            writeln!(out, "  {:<14} {}", name, description)?;
        }
        return Ok(());
    }

    let roster = load_roster(check, None);
    let mut invalid = 0;
    for entry in &roster {
        if !entry.is_valid() {
            invalid += 1;
        }
        writeln!(out, "{}: {}", entry.name, entry.reason())?;
    }
    if invalid > 0 {
        return Err(CliError::InvalidInput(format!(
            "{} of {} roster entries are invalid",
            invalid,
            roster.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_strategy() {
        let mut out = Vec::new();
        handle_bots_command(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for name in ["random", "conservative", "aggressive", "baseline"] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn check_reports_each_entry() {
        let entries = vec!["a=random".to_string(), "b=nope".to_string()];
        let mut out = Vec::new();
        let result = handle_bots_command(&entries, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a: ok"));
        assert!(text.contains("b: unknown strategy"));
    }
}
