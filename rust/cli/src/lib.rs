//! # Arena CLI Library
//!
//! Command-line front end for the bot tournament engine: runs tournaments
//! between the built-in strategies and exposes a few inspection commands.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a command handler and returns the
//! process exit code. Output streams are injected so the whole CLI can be
//! driven from tests.
//!
//! ## Available Subcommands
//!
//! - `run`: play a freeze-out tournament (`--bot name=strategy`, repeated)
//! - `bots`: list strategies or validate roster entries
//! - `cfg`: show the resolved configuration with value sources
//! - `deal`: deal one hand and check deck integrity
//! - `eval-hand`: rank 5 to 7 cards

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod signal;
pub mod ui;

use cli::{ArenaCli, Commands};
use commands::{
    handle_bots_command, handle_cfg_command, handle_deal_command, handle_eval_hand_command,
    handle_run_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["run", "bots", "cfg", "deal", "eval-hand"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a tournament was
/// stopped with Ctrl+C
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["arena", "eval-hand", "AS", "KS", "QS", "JS", "TS"];
/// let code = arena_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ArenaCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Run(args) => handle_run_command(&args, &signal::stop_requested, out, err),
        Commands::Bots { check } => handle_bots_command(&check, out),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Deal { players, seed } => handle_deal_command(players, seed, out),
        Commands::EvalHand { cards } => handle_eval_hand_command(&cards, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::for_error(&e)
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut report = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Usage: arena <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: arena --help")
    };
    let _ = report();
    exit_code::ERROR
}
