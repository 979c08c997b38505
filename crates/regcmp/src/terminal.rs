//! Styled status output for CLI commands.
//!
//! Reports go to stdout; these helpers write one-line status messages to
//! stderr. Errors are always shown, everything else respects `--silent`.

use std::sync::atomic::{AtomicBool, Ordering};

use console::style;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress non-error status lines.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if !quiet() {
        eprintln!("{} {}", style("→").cyan(), message);
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if !quiet() {
        eprintln!("{} {}", style("✓").green().bold(), message);
    }
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if !quiet() {
        eprintln!("{} {}", style("!").yellow().bold(), message);
    }
}
