//! Compare command.

use std::path::Path;

use regcmp_core::{DiffReport, JsonRenderer, NUM_REGS, ReportRenderer, TextRenderer};
use tracing::info;

use super::{load_hints, load_snapshot};
use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, HintArgs, OutputFormat};
use crate::terminal;

/// Handle the `compare` command.
pub fn cmd_compare(
    golden_path: &Path,
    actual_path: &Path,
    format: OutputFormat,
    hint_args: &HintArgs,
) -> i32 {
    let Some(hints) = load_hints(hint_args) else {
        return EXIT_FAILURE;
    };
    let Some(golden) = load_snapshot(golden_path, "golden") else {
        terminal::error(&format!("cannot read {}", golden_path.display()));
        return EXIT_FAILURE;
    };
    let Some(actual) = load_snapshot(actual_path, "actual") else {
        terminal::error(&format!("cannot read {}", actual_path.display()));
        return EXIT_FAILURE;
    };

    let report = DiffReport::compare(&golden, &actual);
    info!(
        matched = report.match_count(),
        mismatched = report.mismatch_count(),
        "comparison complete"
    );

    let rendered = match format {
        OutputFormat::Text => TextRenderer::new(hints).render(&report),
        OutputFormat::Json => JsonRenderer::new(hints).render(&report),
    };
    print!("{rendered}");

    summarize(&report)
}

/// Print a one-line verdict and pick the exit code.
fn summarize(report: &DiffReport) -> i32 {
    if report.is_clean() {
        terminal::success(&format!("all {NUM_REGS} registers match"));
        return EXIT_SUCCESS;
    }

    let diverged = report.mismatch_count() - report.incomparable_count();
    if diverged > 0 {
        terminal::error(&format!(
            "{diverged}/{NUM_REGS} registers diverge from golden"
        ));
    }
    if report.incomparable_count() > 0 {
        terminal::warning(&format!(
            "{}/{NUM_REGS} registers could not be compared",
            report.incomparable_count()
        ));
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: &str = "x00=0x00000000 x01=0x9ddcfc39 x02=0x7a09a5eb x03=0xec66e522 \
        x04=0x5980edb5 x05=0x80000122 x06=0x7ffffabd x07=0x401e1042 x08=0x7fffffff \
        x09=0x6eefda65 x10=0x31a9e800 x11=0x00000003 x12=0xfc1eecab x13=0x00000000 \
        x14=0x00000001 x15=0x00000000 x16=0x00000001 x17=0xb500d4a3 x18=0xffffffb7 \
        x19=0xdba3160f x20=0x00000000 x21=0x00000001 x22=0x00000000 x23=0x00000001 \
        x24=0xd8d40000 x25=0x000001e8 x26=0xffd3b4d7 x27=0x424dd1f4 x28=0x00000100 \
        x29=0x000000fc x30=0x14aae560 x31=0xffffffff";

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_compare_identical_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let golden = write(&dir, "golden.txt", GOLDEN);
        let actual = write(&dir, "actual.txt", GOLDEN);
        let code = cmd_compare(&golden, &actual, OutputFormat::Text, &HintArgs::default());
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[test]
    fn test_compare_divergence_fails() {
        let dir = tempfile::tempdir().unwrap();
        let golden = write(&dir, "golden.txt", GOLDEN);
        let actual = write(
            &dir,
            "actual.txt",
            &GOLDEN.replace("x04=0x5980edb5", "x04=0xd7b839d9"),
        );
        let code = cmd_compare(&golden, &actual, OutputFormat::Json, &HintArgs::default());
        assert_eq!(code, EXIT_FAILURE);
    }

    #[test]
    fn test_compare_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let golden = write(&dir, "golden.txt", GOLDEN);
        let code = cmd_compare(
            &golden,
            &dir.path().join("absent.txt"),
            OutputFormat::Text,
            &HintArgs::default(),
        );
        assert_eq!(code, EXIT_FAILURE);
    }
}
