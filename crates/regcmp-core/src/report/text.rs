use std::fmt::Write;

use super::{ReportRenderer, format_match_rate};
use crate::diff::{format_delta, to_binary};
use crate::hints::REVIEW_CHECKLIST;
use crate::{DiffEntry, DiffReport, DiffStatus, HintTable, NUM_REGS, format_hex};

const RULE_WIDTH: usize = 80;

/// Plain-text divergence report.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    hints: HintTable,
}

impl TextRenderer {
    #[must_use]
    pub const fn new(hints: HintTable) -> Self {
        Self { hints }
    }

    #[must_use]
    pub const fn hints(&self) -> &HintTable {
        &self.hints
    }

    fn write_table(out: &mut String, report: &DiffReport) {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "RISC-V CPU register comparison");
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "Reg    Golden       Actual       Status Delta");
        let _ = writeln!(out, "{light}");

        for entry in report.entries() {
            let row = format!(
                "{:<6} {:<12} {:<12} {:<6} {}",
                entry.register.to_string(),
                hex_or_dash(entry.golden),
                hex_or_dash(entry.actual),
                status_mark(entry.status),
                entry.delta_display()
            );
            let _ = writeln!(out, "{}", row.trim_end());
        }

        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "Matches: {}/{NUM_REGS}", report.match_count());
        let _ = writeln!(out, "Mismatches: {}/{NUM_REGS}", report.mismatch_count());
        let _ = writeln!(
            out,
            "Match rate: {}",
            format_match_rate(report.match_count())
        );
    }

    fn write_details(out: &mut String, report: &DiffReport) {
        let mismatched = report.mismatched_registers();
        if mismatched.is_empty() {
            return;
        }

        let names: Vec<String> = mismatched.iter().map(ToString::to_string).collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "Mismatched registers: {}", names.join(", "));
        let _ = writeln!(out);
        let _ = writeln!(out, "Details:");

        for entry in report.mismatches() {
            write_entry_detail(out, entry);
        }
    }

    fn write_incomparable(out: &mut String, report: &DiffReport) {
        if report.incomparable_count() == 0 {
            return;
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Incomparable registers ({}/{NUM_REGS}):",
            report.incomparable_count()
        );
        for entry in report.incomparable() {
            let side = match (entry.golden, entry.actual) {
                (None, None) => "both snapshots",
                (None, Some(_)) => "golden snapshot",
                _ => "actual snapshot",
            };
            let _ = writeln!(
                out,
                "  {} ({}): missing from {side}",
                entry.register,
                entry.register.abi_name()
            );
        }
    }

    fn write_hints(&self, out: &mut String, report: &DiffReport) {
        let hints = self.hints.applicable(report);
        if hints.is_empty() {
            return;
        }
        let _ = writeln!(out, "Diagnostic hints:");
        for hint in hints {
            let _ = writeln!(out, "- {}", hint.hint);
        }
        let _ = writeln!(out);
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &DiffReport) -> String {
        let mut out = String::new();
        Self::write_table(&mut out, report);
        Self::write_details(&mut out, report);
        Self::write_incomparable(&mut out, report);

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        self.write_hints(&mut out, report);

        let _ = writeln!(out, "Suggested checks:");
        for (i, item) in REVIEW_CHECKLIST.iter().enumerate() {
            let _ = writeln!(out, "{}. {item}", i + 1);
        }
        out
    }
}

fn write_entry_detail(out: &mut String, entry: &DiffEntry) {
    let (Some(golden), Some(actual)) = (entry.golden, entry.actual) else {
        return;
    };
    let bits: Vec<String> = entry.differing_bits.iter().map(ToString::to_string).collect();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ({}): golden {} vs actual {}",
        entry.register,
        entry.register.abi_name(),
        format_hex(golden),
        format_hex(actual)
    );
    let _ = writeln!(out, "  golden (bin): {}", to_binary(golden));
    let _ = writeln!(out, "  actual (bin): {}", to_binary(actual));
    let _ = writeln!(out, "  differing bits: {}", bits.join(", "));
    let _ = writeln!(
        out,
        "  delta: {} ({:+})",
        format_delta(entry.signed_delta),
        entry.signed_delta
    );
}

fn hex_or_dash(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), format_hex)
}

const fn status_mark(status: DiffStatus) -> &'static str {
    match status {
        DiffStatus::Match => "✓",
        DiffStatus::Mismatch => "✗",
        DiffStatus::Incomparable => "?",
    }
}
