//! Ctrl+C handling: the first press finishes the current hand and stops,
//! a second one exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::exit_code;

static STOP: AtomicBool = AtomicBool::new(false);

pub fn install() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if STOP.swap(true, Ordering::SeqCst) {
            std::process::exit(exit_code::INTERRUPTED);
        }
    })
}

pub fn stop_requested() -> bool {
    STOP.load(Ordering::SeqCst)
}
