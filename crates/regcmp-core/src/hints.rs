//! Diagnostic hints keyed by register.
//!
//! The hint table is configuration: an ordered list of `register -> text`
//! pairs. Order is priority order in the rendered report. Hints are only
//! emitted for registers that mismatched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::read_source;
use crate::{DiffReport, NUM_REGS, RegisterId, Result};

/// Generic review suggestions printed at the end of every text report.
pub const REVIEW_CHECKLIST: [&str; 4] = [
    "ALU subtraction logic",
    "Memory load/store instruction implementation",
    "Branch condition evaluation",
    "Register write-back timing",
];

/// Built-in hints, in priority order.
const BUILTIN_HINTS: [(u8, &str); 4] = [
    (
        4,
        "x04 divergence likely stems from a SUB instruction or an arithmetic fault",
    ),
    (
        29,
        "x29 divergence may relate to a memory operation or address calculation",
    ),
    (30, "x30 divergence may relate to an accumulation or a memory load"),
    (31, "x31 divergence may relate to counter or loop logic"),
];

/// One hint entry. Also the on-disk JSON shape: `{"register": "x04", "hint": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub register: RegisterId,
    pub hint: String,
}

/// Ordered register -> hint lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintTable {
    entries: Vec<Hint>,
}

impl Default for HintTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HintTable {
    /// A table with no hints.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in hints for x04, x29, x30 and x31.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (index, text) in BUILTIN_HINTS {
            if let Some(reg) = RegisterId::new(index) {
                table.insert(reg, text);
            }
        }
        table
    }

    /// Parse a JSON array of `{"register", "hint"}` objects.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or a non-canonical register identifier.
    pub fn from_json(text: &str) -> Result<Self> {
        let hints: Vec<Hint> = serde_json::from_str(text)?;
        let mut table = Self::empty();
        for hint in hints {
            table.insert(hint.register, hint.hint);
        }
        Ok(table)
    }

    /// Load a JSON hint table from disk.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or its content is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&read_source(path)?)
    }

    /// Set the hint for a register.
    ///
    /// An existing hint is replaced in place, keeping its priority. New
    /// registers are appended at the lowest priority.
    pub fn insert(&mut self, register: RegisterId, hint: impl Into<String>) {
        let hint = hint.into();
        match self.entries.iter_mut().find(|h| h.register == register) {
            Some(existing) => existing.hint = hint,
            None => self.entries.push(Hint { register, hint }),
        }
    }

    /// Remove the hint for a register.
    pub fn remove(&mut self, register: RegisterId) -> Option<String> {
        let pos = self.entries.iter().position(|h| h.register == register)?;
        Some(self.entries.remove(pos).hint)
    }

    /// Overlay another table onto this one.
    pub fn merge(&mut self, other: Self) {
        for hint in other.entries {
            self.insert(hint.register, hint.hint);
        }
    }

    #[must_use]
    pub fn get(&self, register: RegisterId) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.register == register)
            .map(|h| h.hint.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hint> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hints whose register mismatched in `report`, in priority order.
    #[must_use]
    pub fn applicable(&self, report: &DiffReport) -> Vec<&Hint> {
        let mut mismatched = [false; NUM_REGS];
        for entry in report.mismatches() {
            mismatched[entry.register.index() as usize] = true;
        }
        self.entries
            .iter()
            .filter(|h| mismatched[h.register.index() as usize])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegisterSnapshot;

    fn reg(index: u8) -> RegisterId {
        RegisterId::new(index).unwrap()
    }

    #[test]
    fn test_builtin_order() {
        let table = HintTable::builtin();
        let regs: Vec<_> = table.iter().map(|h| h.register.index()).collect();
        assert_eq!(regs, vec![4, 29, 30, 31]);
        assert!(table.get(reg(4)).unwrap().contains("arithmetic"));
        assert!(table.get(reg(5)).is_none());
    }

    #[test]
    fn test_insert_keeps_priority() {
        let mut table = HintTable::builtin();
        table.insert(reg(29), "replaced");
        table.insert(reg(2), "stack pointer drift");
        let regs: Vec<_> = table.iter().map(|h| h.register.index()).collect();
        assert_eq!(regs, vec![4, 29, 30, 31, 2]);
        assert_eq!(table.get(reg(29)), Some("replaced"));
    }

    #[test]
    fn test_remove() {
        let mut table = HintTable::builtin();
        assert!(table.remove(reg(30)).is_some());
        assert!(table.remove(reg(30)).is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_applicable_only_mismatched() {
        let golden = RegisterSnapshot::from_array([0; NUM_REGS]);
        let mut values = [0; NUM_REGS];
        values[31] = 1;
        values[4] = 1;
        values[9] = 1;
        let actual = RegisterSnapshot::from_array(values);
        let report = DiffReport::compare(&golden, &actual);

        let hints: Vec<_> = HintTable::builtin()
            .applicable(&report)
            .iter()
            .map(|h| h.register.index())
            .collect();
        assert_eq!(hints, vec![4, 31]);
    }

    #[test]
    fn test_incomparable_gets_no_hint() {
        let golden = RegisterSnapshot::from_array([0; NUM_REGS]);
        let report = DiffReport::compare(&golden, &RegisterSnapshot::new());
        assert!(HintTable::builtin().applicable(&report).is_empty());
    }

    #[test]
    fn test_from_json_and_merge() {
        let json = r#"[
            {"register": "x02", "hint": "stack pointer drift"},
            {"register": "x04", "hint": "check the SUB encoding"}
        ]"#;
        let loaded = HintTable::from_json(json).unwrap();
        assert_eq!(loaded.len(), 2);

        let mut table = HintTable::builtin();
        table.merge(loaded);
        assert_eq!(table.get(reg(4)), Some("check the SUB encoding"));
        assert_eq!(table.iter().last().unwrap().register, reg(2));
    }

    #[test]
    fn test_from_json_rejects_non_canonical() {
        let err = HintTable::from_json(r#"[{"register": "x4", "hint": "nope"}]"#).unwrap_err();
        assert!(matches!(err, crate::Error::HintTable(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hints.json");
        std::fs::write(&path, r#"[{"register": "x10", "hint": "return value"}]"#).unwrap();
        let table = HintTable::from_file(&path).unwrap();
        assert_eq!(table.get(reg(10)), Some("return value"));

        let err = HintTable::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::Error::MissingSourceFile(_)));
    }
}
