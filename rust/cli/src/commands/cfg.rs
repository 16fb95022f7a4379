//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, every value paired with its
//! source (`default`, `file` or `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "starting_chips": {
//!     "value": 1000,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "blind_increase_interval": {
            "value": config.blind_increase_interval,
            "source": sources.blind_increase_interval,
        },
        "blind_increase_factor": {
            "value": config.blind_increase_factor,
            "source": sources.blind_increase_factor,
        },
        "time_limit_ms": {
            "value": config.time_limit_ms,
            "source": sources.time_limit_ms,
        },
        "max_faults": {
            "value": config.max_faults,
            "source": sources.max_faults,
        },
        "max_hands": {
            "value": config.max_hands,
            "source": sources.max_hands,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
