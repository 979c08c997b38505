//! Batch command.

use std::fmt::Write;
use std::path::Path;

use regcmp_core::batch::{self, BatchOutcome};
use regcmp_core::report::format_match_rate;
use regcmp_core::{HintTable, NUM_REGS};
use tracing::{error, warn};

use super::{load_hints, load_snapshot};
use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, HintArgs};
use crate::terminal;

/// Handle the `batch` command.
pub fn cmd_batch(
    golden_path: &Path,
    actuals_path: &Path,
    jobs: usize,
    hint_args: &HintArgs,
) -> i32 {
    let Some(hints) = load_hints(hint_args) else {
        return EXIT_FAILURE;
    };
    let Some(golden) = load_snapshot(golden_path, "golden") else {
        terminal::error(&format!("cannot read {}", golden_path.display()));
        return EXIT_FAILURE;
    };

    let outcomes = match batch::compare_file(&golden, actuals_path, jobs) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            error!(error = %e, path = %actuals_path.display(), "batch comparison failed");
            terminal::error(&format!("cannot compare {}", actuals_path.display()));
            return EXIT_FAILURE;
        }
    };
    if outcomes.is_empty() {
        terminal::warning(&format!("no snapshots in {}", actuals_path.display()));
        return EXIT_FAILURE;
    }

    for outcome in &outcomes {
        for issue in &outcome.issues {
            warn!("{issue}");
        }
        println!("{}", summary_line(outcome, &hints));
    }

    let clean = outcomes.iter().filter(|o| o.report.is_clean()).count();
    if clean == outcomes.len() {
        terminal::success(&format!("all {clean} snapshots match golden"));
        EXIT_SUCCESS
    } else {
        terminal::error(&format!(
            "{}/{} snapshots diverge from golden",
            outcomes.len() - clean,
            outcomes.len()
        ));
        EXIT_FAILURE
    }
}

/// One line per snapshot: match count, rate, mismatched registers and hints.
fn summary_line(outcome: &BatchOutcome, hints: &HintTable) -> String {
    let report = &outcome.report;
    let mut line = format!(
        "line {}: {}/{NUM_REGS} match ({})",
        outcome.line,
        report.match_count(),
        format_match_rate(report.match_count())
    );
    let mismatched = report.mismatched_registers();
    if !mismatched.is_empty() {
        let names: Vec<String> = mismatched.iter().map(ToString::to_string).collect();
        let _ = write!(line, ", mismatched: {}", names.join(" "));
    }
    if report.incomparable_count() > 0 {
        let _ = write!(line, ", incomparable: {}", report.incomparable_count());
    }
    let applicable: Vec<&str> = hints
        .applicable(report)
        .iter()
        .map(|h| h.hint.as_str())
        .collect();
    if !applicable.is_empty() {
        let _ = write!(line, " [{}]", applicable.join("; "));
    }
    line
}
