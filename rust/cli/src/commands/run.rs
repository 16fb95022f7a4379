//! Tournament command handler.
//!
//! Resolves the configuration (defaults, file, environment, then flags),
//! validates the roster, plays the tournament and reports standings.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use arena_bots::roster::{into_handles, load_roster};
use arena_engine::logger::HandLogger;
use arena_engine::tournament::{Standing, Tournament, TournamentResult};

use crate::cli::RunArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

#[derive(Serialize)]
struct StandingsReport<'a> {
    finished_at: String,
    seed: Option<u64>,
    hands_played: u64,
    interrupted: bool,
    standings: &'a [Standing],
}

/// Handle the run command.
///
/// `stop` is polled before every hand; once it returns true the tournament
/// ends early and the handler returns [`CliError::Interrupted`] after
/// reporting the standings so far.
pub fn handle_run_command(
    args: &RunArgs,
    stop: &dyn Fn() -> bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };
    apply_flags(&mut cfg, args)?;
    // fix the seed up front so every run can be replayed
    let seed = *cfg.seed.get_or_insert_with(rand::random);

    let roster = load_roster(&args.bots, Some(seed));
    let invalid: Vec<_> = roster.iter().filter(|e| !e.is_valid()).collect();
    if !invalid.is_empty() {
        for entry in &invalid {
            ui::write_error(err, &format!("bot {:?}: {}", entry.name, entry.reason()))?;
        }
        return Err(CliError::InvalidInput(format!(
            "{} invalid roster entr{}",
            invalid.len(),
            if invalid.len() == 1 { "y" } else { "ies" }
        )));
    }
    let handles = into_handles(roster)?;

    let mut tournament = Tournament::new(cfg.to_settings(), handles)?;
    if let Some(path) = &args.output {
        tournament = tournament.with_logger(HandLogger::create(path)?);
    }

    writeln!(out, "Seed: {}", seed)?;
    info!(seed, players = args.bots.len(), "Running tournament");
    let result = tournament.run_while(|| !stop())?;

    report(&result, out)?;
    if let Some(path) = &args.standings {
        write_standings_json(path, &result, seed)?;
        writeln!(out, "Standings written to {}", path.display())?;
    }

    if result.interrupted {
        ui::display_warning(err, "tournament stopped before it finished")?;
        return Err(CliError::Interrupted(format!(
            "stopped after {} hands",
            result.hands_played
        )));
    }
    Ok(())
}

fn apply_flags(cfg: &mut Config, args: &RunArgs) -> Result<(), CliError> {
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(hands) = args.max_hands {
        cfg.max_hands = hands;
    }
    if let Some(chips) = args.starting_chips {
        cfg.starting_chips = chips;
    }
    if let Some(secs) = args.time_limit {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(CliError::InvalidInput(format!(
                "--time-limit must be a positive number of seconds, got {}",
                secs
            )));
        }
        cfg.time_limit_ms = ((secs * 1000.0).round() as u64).max(1);
    }
    config::validate(cfg)?;
    Ok(())
}

fn report(result: &TournamentResult, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Hands played: {}", result.hands_played)?;
    ui::write_standings(out, &result.standings)?;
    if let Some(winner) = result.winner() {
        writeln!(out, "Winner: {} ({} chips)", winner.name, winner.chips)?;
    }
    Ok(())
}

fn write_standings_json(path: &Path, result: &TournamentResult, seed: u64) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let report = StandingsReport {
        finished_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        seed: Some(seed),
        hands_played: result.hands_played,
        interrupted: result.interrupted,
        standings: &result.standings,
    };
    let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
    fs::write(path, json + "\n")?;
    Ok(())
}
