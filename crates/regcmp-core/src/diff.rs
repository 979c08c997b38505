//! Per-register comparison of a golden snapshot against an actual one.

use serde::Serialize;
use tracing::debug;

use crate::{NUM_REGS, RegisterId, RegisterSnapshot};

/// Outcome for a single register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Golden and actual values are bitwise equal.
    Match,
    /// Both values present but different.
    Mismatch,
    /// At least one snapshot lacks this register.
    Incomparable,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::Incomparable => write!(f, "incomparable"),
        }
    }
}

/// Comparison result for one register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub register: RegisterId,
    pub status: DiffStatus,
    /// Golden value (absent only when incomparable).
    pub golden: Option<u32>,
    /// Actual value (absent only when incomparable).
    pub actual: Option<u32>,
    /// `actual - golden` with 32-bit wraparound. Zero unless mismatched.
    pub signed_delta: i32,
    /// Bit positions (0 = LSB) that differ, highest first. Empty unless mismatched.
    pub differing_bits: Vec<u8>,
}

impl DiffEntry {
    /// Compare one register's golden and actual values.
    #[must_use]
    pub fn compare(register: RegisterId, golden: Option<u32>, actual: Option<u32>) -> Self {
        let (status, signed_delta, differing_bits) = match (golden, actual) {
            (Some(g), Some(a)) if g == a => (DiffStatus::Match, 0, Vec::new()),
            (Some(g), Some(a)) => (
                DiffStatus::Mismatch,
                wrapping_delta(g, a),
                differing_bits(g, a),
            ),
            _ => (DiffStatus::Incomparable, 0, Vec::new()),
        };
        Self {
            register,
            status,
            golden,
            actual,
            signed_delta,
            differing_bits,
        }
    }

    #[must_use]
    pub fn matches(&self) -> bool {
        self.status == DiffStatus::Match
    }

    /// Delta as shown in the summary table: `0`, `N/A`, or `±0xNNNNNNNN`.
    #[must_use]
    pub fn delta_display(&self) -> String {
        match self.status {
            DiffStatus::Match => "0".to_string(),
            DiffStatus::Mismatch => format_delta(self.signed_delta),
            DiffStatus::Incomparable => "N/A".to_string(),
        }
    }
}

/// `actual - golden` reinterpreted as a two's-complement 32-bit value.
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub const fn wrapping_delta(golden: u32, actual: u32) -> i32 {
    actual.wrapping_sub(golden) as i32
}

/// Format a signed delta as `+0xNNNNNNNN` or `-0xNNNNNNNN` (absolute magnitude).
#[must_use]
pub fn format_delta(delta: i32) -> String {
    let sign = if delta < 0 { '-' } else { '+' };
    format!("{sign}0x{:08x}", delta.unsigned_abs())
}

/// Render a value as a 32-character binary string, bit 31 first.
#[must_use]
pub fn to_binary(value: u32) -> String {
    format!("{value:032b}")
}

/// Bit positions where `a` and `b` differ, from bit 31 down to bit 0.
#[must_use]
pub fn differing_bits(a: u32, b: u32) -> Vec<u8> {
    let diff = a ^ b;
    (0..32u8).rev().filter(|bit| diff >> bit & 1 == 1).collect()
}

/// Result of comparing a golden snapshot against an actual one.
///
/// Always holds exactly one entry per canonical register, in `x00..x31`
/// order. Incomparable registers count toward the mismatch total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    entries: Vec<DiffEntry>,
    match_count: usize,
    mismatch_count: usize,
    incomparable_count: usize,
}

impl DiffReport {
    /// Compare every canonical register of `golden` against `actual`.
    ///
    /// Non-canonical extras in either snapshot are ignored.
    #[must_use]
    pub fn compare(golden: &RegisterSnapshot, actual: &RegisterSnapshot) -> Self {
        let entries: Vec<DiffEntry> = RegisterId::all()
            .map(|reg| DiffEntry::compare(reg, golden.get(reg), actual.get(reg)))
            .collect();

        let match_count = entries.iter().filter(|e| e.matches()).count();
        let incomparable_count = entries
            .iter()
            .filter(|e| e.status == DiffStatus::Incomparable)
            .count();

        debug!(
            matched = match_count,
            incomparable = incomparable_count,
            "register diff complete"
        );

        Self {
            entries,
            match_count,
            mismatch_count: NUM_REGS - match_count,
            incomparable_count,
        }
    }

    /// All 32 entries, `x00` first.
    #[must_use]
    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    /// Entry for one register.
    #[must_use]
    pub fn entry(&self, reg: RegisterId) -> &DiffEntry {
        &self.entries[reg.index() as usize]
    }

    #[must_use]
    pub const fn match_count(&self) -> usize {
        self.match_count
    }

    /// Registers that did not match, including incomparable ones.
    #[must_use]
    pub const fn mismatch_count(&self) -> usize {
        self.mismatch_count
    }

    #[must_use]
    pub const fn incomparable_count(&self) -> usize {
        self.incomparable_count
    }

    /// True when every register matched.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.match_count == NUM_REGS
    }

    /// Entries with both values present but different.
    pub fn mismatches(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == DiffStatus::Mismatch)
    }

    /// Entries missing from at least one snapshot.
    pub fn incomparable(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == DiffStatus::Incomparable)
    }

    /// Identifiers of mismatched registers, ascending.
    #[must_use]
    pub fn mismatched_registers(&self) -> Vec<RegisterId> {
        self.mismatches().map(|e| e.register).collect()
    }
}

/// Compare two snapshots. Shorthand for [`DiffReport::compare`].
#[must_use]
pub fn diff_snapshots(golden: &RegisterSnapshot, actual: &RegisterSnapshot) -> DiffReport {
    DiffReport::compare(golden, actual)
}
