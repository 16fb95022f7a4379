//! Process exit codes.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure: bad input, bad configuration, I/O, engine invariant.
pub const ERROR: i32 = 2;

/// Stopped with Ctrl+C (128 + SIGINT).
pub const INTERRUPTED: i32 = 130;

pub fn for_error(error: &CliError) -> i32 {
    match error {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}
