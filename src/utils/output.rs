//! Status output
//!
//! Informational lines (created files, fetch results, build steps) go through
//! [`status!`](crate::status) and are hidden by `--quiet`. Errors, failed
//! dependencies and interactive prompts are always printed.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Hide (or show again) status lines for the rest of the process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether status lines are hidden.
#[must_use]
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// `println!` unless `--quiet` was given.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::utils::output::is_quiet() {
            println!($($arg)*);
        }
    };
}
