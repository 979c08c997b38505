use serde::Serialize;

use super::{ReportRenderer, format_match_rate};
use crate::diff::format_delta;
use crate::{DiffReport, DiffStatus, Hint, HintTable, RegisterId, format_hex};

/// Machine-readable report (pretty-printed JSON).
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    hints: HintTable,
}

impl JsonRenderer {
    #[must_use]
    pub const fn new(hints: HintTable) -> Self {
        Self { hints }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    match_count: usize,
    mismatch_count: usize,
    incomparable_count: usize,
    match_rate: String,
    mismatched: Vec<RegisterId>,
    registers: Vec<JsonEntry>,
    hints: Vec<&'a Hint>,
}

#[derive(Serialize)]
struct JsonEntry {
    register: RegisterId,
    abi_name: &'static str,
    status: DiffStatus,
    golden: Option<String>,
    actual: Option<String>,
    signed_delta: i32,
    delta: Option<String>,
    differing_bits: Vec<u8>,
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &DiffReport) -> String {
        let registers = report
            .entries()
            .iter()
            .map(|e| JsonEntry {
                register: e.register,
                abi_name: e.register.abi_name(),
                status: e.status,
                golden: e.golden.map(format_hex),
                actual: e.actual.map(format_hex),
                signed_delta: e.signed_delta,
                delta: (e.status == DiffStatus::Mismatch).then(|| format_delta(e.signed_delta)),
                differing_bits: e.differing_bits.clone(),
            })
            .collect();

        let json = JsonReport {
            match_count: report.match_count(),
            mismatch_count: report.mismatch_count(),
            incomparable_count: report.incomparable_count(),
            match_rate: format_match_rate(report.match_count()),
            mismatched: report.mismatched_registers(),
            registers,
            hints: self.hints.applicable(report),
        };

        match serde_json::to_string_pretty(&json) {
            Ok(mut text) => {
                text.push('\n');
                text
            }
            Err(e) => error_json(&e.to_string()),
        }
    }
}

/// Fallback document when the report itself cannot be serialized.
fn error_json(message: &str) -> String {
    format!("{}\n", serde_json::json!({ "error": message }))
}
