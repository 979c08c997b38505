//! Comparing one golden snapshot against many actual snapshots.
//!
//! Every comparison is independent, so runs are spread over a rayon pool.
//! Results always come back in input order.

use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::error::read_source;
use crate::snapshot::is_comment_or_blank;
use crate::{DiffReport, ParseIssue, RegisterSnapshot, Result};

/// Comparison of one actual snapshot line against the golden snapshot.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// 1-based source line of the actual snapshot.
    pub line: usize,
    pub report: DiffReport,
    /// Tokens skipped while parsing this line.
    pub issues: Vec<ParseIssue>,
}

/// Compare `golden` against each snapshot in `actuals`, in parallel.
#[must_use]
pub fn compare_all(golden: &RegisterSnapshot, actuals: &[RegisterSnapshot]) -> Vec<DiffReport> {
    actuals
        .par_iter()
        .map(|actual| DiffReport::compare(golden, actual))
        .collect()
}

/// Compare `golden` against every snapshot line of `text`.
///
/// Each non-blank, non-comment line is one actual snapshot. `jobs == 0` uses
/// rayon's global pool, otherwise a dedicated pool with that many threads.
///
/// # Errors
///
/// Fails only if a dedicated thread pool cannot be built.
pub fn compare_lines(
    golden: &RegisterSnapshot,
    text: &str,
    jobs: usize,
) -> Result<Vec<BatchOutcome>> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_comment_or_blank(line))
        .map(|(idx, line)| (idx + 1, line))
        .collect();
    debug!(snapshots = lines.len(), jobs, "batch compare");

    let run = || {
        lines
            .par_iter()
            .map(|&(line, src)| {
                let parsed = RegisterSnapshot::parse_numbered_line(line, src);
                BatchOutcome {
                    line,
                    report: DiffReport::compare(golden, &parsed.snapshot),
                    issues: parsed.issues,
                }
            })
            .collect::<Vec<BatchOutcome>>()
    };

    if jobs == 0 {
        Ok(run())
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(run))
    }
}

/// Load a file of actual snapshot lines and compare each against `golden`.
///
/// # Errors
///
/// Fails if the file is missing or unreadable, or the thread pool cannot be built.
pub fn compare_file(
    golden: &RegisterSnapshot,
    path: &Path,
    jobs: usize,
) -> Result<Vec<BatchOutcome>> {
    compare_lines(golden, &read_source(path)?, jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_REGS, RegisterId};

    fn line_for(values: &[u32; NUM_REGS]) -> String {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("x{i:02}=0x{v:08x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_compare_all_preserves_order() {
        let golden = RegisterSnapshot::from_array([0; NUM_REGS]);
        let actuals: Vec<_> = (0..64u32)
            .map(|i| {
                let mut values = [0; NUM_REGS];
                values[(i % 32) as usize] = i + 1;
                RegisterSnapshot::from_array(values)
            })
            .collect();

        let reports = compare_all(&golden, &actuals);
        assert_eq!(reports.len(), 64);
        for (i, report) in reports.iter().enumerate() {
            let reg = RegisterId::new((i % 32) as u8).unwrap();
            assert_eq!(report.mismatched_registers(), vec![reg]);
        }
    }

    #[test]
    fn test_compare_lines() {
        let golden_values = [5; NUM_REGS];
        let golden = RegisterSnapshot::from_array(golden_values);
        let mut changed = golden_values;
        changed[30] = 6;
        let text = format!(
            "# run 1\n{}\n\n{}\nx00=0x5 junk\n",
            line_for(&golden_values),
            line_for(&changed)
        );

        let outcomes = compare_lines(&golden, &text, 2).unwrap();
        assert_eq!(outcomes.len(), 3);

        assert_eq!(outcomes[0].line, 2);
        assert!(outcomes[0].report.is_clean());

        assert_eq!(outcomes[1].line, 4);
        assert_eq!(outcomes[1].report.mismatch_count(), 1);

        assert_eq!(outcomes[2].line, 5);
        assert_eq!(outcomes[2].report.incomparable_count(), 31);
        assert_eq!(
            outcomes[2].issues,
            vec![ParseIssue::MalformedToken {
                line: 5,
                token: "junk".to_string()
            }]
        );
    }

    #[test]
    fn test_compare_lines_global_pool() {
        let golden = RegisterSnapshot::from_array([1; NUM_REGS]);
        let outcomes = compare_lines(&golden, &line_for(&[1; NUM_REGS]), 0).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].report.is_clean());
    }

    #[test]
    fn test_compare_file_missing() {
        let golden = RegisterSnapshot::new();
        let err = compare_file(&golden, Path::new("/nonexistent/actuals.txt"), 0).unwrap_err();
        assert!(matches!(err, crate::Error::MissingSourceFile(_)));
    }
}
