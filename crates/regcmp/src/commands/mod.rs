//! Command implementations.
//!
//! Each submodule handles one CLI command.

mod batch;
mod compare;
mod imem;

use std::path::Path;

use regcmp_core::{HintTable, RegisterSnapshot};
use tracing::{debug, error, warn};

use crate::cli::{Cli, Commands, HintArgs};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Compare {
            golden,
            actual,
            format,
            hints,
        } => compare::cmd_compare(golden, actual, *format, hints),
        Commands::Batch {
            golden,
            actuals,
            jobs,
            hints,
        } => batch::cmd_batch(golden, actuals, *jobs, hints),
        Commands::Imem { input, imem_size } => imem::cmd_imem(input, *imem_size),
    }
}

/// Load a snapshot file, logging skipped tokens and extra identifiers.
///
/// Returns `None` (after logging) if the file cannot be read.
fn load_snapshot(path: &Path, label: &str) -> Option<RegisterSnapshot> {
    let parsed = match RegisterSnapshot::from_file(path) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to load {label} snapshot");
            return None;
        }
    };

    for issue in &parsed.issues {
        warn!(snapshot = label, "{issue}");
    }
    for name in parsed.snapshot.extras().keys() {
        warn!(snapshot = label, "ignoring non-canonical register {name:?}");
    }
    let missing = parsed.snapshot.missing_registers();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        warn!(
            snapshot = label,
            "incomplete snapshot, missing {}",
            names.join(", ")
        );
    }
    debug!(
        snapshot = label,
        registers = parsed.snapshot.len(),
        path = %path.display(),
        "loaded snapshot"
    );
    Some(parsed.snapshot)
}

/// Build the hint table from CLI options.
fn load_hints(args: &HintArgs) -> Option<HintTable> {
    let mut table = if args.no_default_hints {
        HintTable::empty()
    } else {
        HintTable::builtin()
    };
    if let Some(path) = &args.hints {
        match HintTable::from_file(path) {
            Ok(loaded) => {
                debug!(hints = loaded.len(), path = %path.display(), "loaded hint table");
                table.merge(loaded);
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "failed to load hint table");
                return None;
            }
        }
    }
    Some(table)
}
