//! Command handlers for the `arena` binary.
//!
//! Each handler takes its output streams as `&mut dyn Write` and returns
//! `Result<(), CliError>`; exit codes are decided by the caller.

mod bots;
mod cfg;
mod deal;
mod eval_hand;
mod run;

pub use bots::handle_bots_command;
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval_hand::handle_eval_hand_command;
pub use run::handle_run_command;
