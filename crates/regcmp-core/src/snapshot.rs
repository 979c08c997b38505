//! Register snapshots and the `name=value` snapshot text parser.
//!
//! Snapshot text is a sequence of whitespace-separated `identifier=value`
//! tokens, e.g. `x00=0x00000000 x01=0x9ddcfc39`. Parsing never fails as a
//! whole: malformed tokens are skipped and reported as [`ParseIssue`]s.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::error::read_source;
use crate::{NUM_REGS, RegisterId, Result};

/// A recoverable problem with a single snapshot token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("line {line}: token {token:?} has no '=', skipped")]
    MalformedToken { line: usize, token: String },
    #[error("line {line}: {name}={value:?} is not a 32-bit hex value, skipped")]
    InvalidHexValue {
        line: usize,
        name: String,
        value: String,
    },
}

/// A register value as it appeared in the source, plus its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterValue {
    /// Literal text from the source (e.g. `0x9ddcfc39`).
    pub raw: String,
    /// Parsed unsigned value.
    pub value: u32,
}

impl RegisterValue {
    /// Build a value from an integer; the raw form is the canonical `0x%08x`.
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        Self {
            raw: format_hex(value),
            value,
        }
    }

    /// Parse a hex literal (optional `0x`/`0X` prefix, at most 32 bits).
    ///
    /// # Panics
    ///
    /// Panics if the built-in hex pattern fails to compile.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let pattern = HEX_PATTERN
            .get_or_init(|| Regex::new(r"^(?:0[xX])?([0-9a-fA-F]+)$").unwrap());
        let digits = pattern.captures(raw)?.get(1)?.as_str();
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }
}

/// Format a value as `0x` followed by exactly eight lowercase hex digits.
#[must_use]
pub fn format_hex(value: u32) -> String {
    format!("0x{value:08x}")
}

/// Register values keyed by canonical identifier.
///
/// A snapshot may be partial. Identifiers outside `x00..x31` are kept in a
/// separate table so typos can be surfaced, but they never take part in a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterSnapshot {
    regs: BTreeMap<RegisterId, RegisterValue>,
    extras: BTreeMap<String, RegisterValue>,
}

/// Output of parsing snapshot text.
#[derive(Debug, Clone, Default)]
pub struct ParsedSnapshot {
    pub snapshot: RegisterSnapshot,
    /// Tokens that were skipped, in source order.
    pub issues: Vec<ParseIssue>,
}

impl RegisterSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(register, value)` pairs. Later pairs win.
    pub fn from_values(values: impl IntoIterator<Item = (RegisterId, u32)>) -> Self {
        let mut snapshot = Self::new();
        for (reg, value) in values {
            snapshot.insert(reg, value);
        }
        snapshot
    }

    /// Build a complete snapshot from an array indexed by register number.
    #[must_use]
    pub fn from_array(values: [u32; NUM_REGS]) -> Self {
        Self::from_values(RegisterId::all().zip(values))
    }

    /// Parse a single line of `identifier=value` tokens.
    #[must_use]
    pub fn parse_line(line: &str) -> ParsedSnapshot {
        Self::parse_numbered_line(1, line)
    }

    /// Parse one line, tagging issues with the given 1-based line number.
    pub(crate) fn parse_numbered_line(line_no: usize, line: &str) -> ParsedSnapshot {
        let mut parsed = ParsedSnapshot::default();
        parsed.snapshot.apply_line(line_no, line, &mut parsed.issues);
        parsed
    }

    /// Parse multi-line snapshot text into one snapshot.
    ///
    /// Blank lines and lines starting with `#` or `//` are skipped. Tokens on
    /// later lines overwrite earlier ones.
    #[must_use]
    pub fn parse(text: &str) -> ParsedSnapshot {
        let mut parsed = ParsedSnapshot::default();
        for (idx, line) in text.lines().enumerate() {
            if is_comment_or_blank(line) {
                continue;
            }
            parsed.snapshot.apply_line(idx + 1, line, &mut parsed.issues);
        }
        parsed
    }

    /// Load and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingSourceFile`] if the path does not exist.
    pub fn from_file(path: &Path) -> Result<ParsedSnapshot> {
        let text = read_source(path)?;
        Ok(Self::parse(&text))
    }

    fn apply_line(&mut self, line_no: usize, line: &str, issues: &mut Vec<ParseIssue>) {
        for token in line.split_whitespace() {
            let Some((name, value)) = token.split_once('=') else {
                issues.push(ParseIssue::MalformedToken {
                    line: line_no,
                    token: token.to_string(),
                });
                continue;
            };
            if name.is_empty() {
                issues.push(ParseIssue::MalformedToken {
                    line: line_no,
                    token: token.to_string(),
                });
                continue;
            }
            let Some(value) = RegisterValue::parse(value) else {
                issues.push(ParseIssue::InvalidHexValue {
                    line: line_no,
                    name: name.to_string(),
                    value: value.to_string(),
                });
                continue;
            };
            match name.parse::<RegisterId>() {
                Ok(reg) => {
                    self.regs.insert(reg, value);
                }
                Err(_) => {
                    self.extras.insert(name.to_string(), value);
                }
            }
        }
    }

    /// Set a register value.
    pub fn insert(&mut self, reg: RegisterId, value: u32) {
        self.regs.insert(reg, RegisterValue::from_u32(value));
    }

    /// Value of a register, if present.
    #[must_use]
    pub fn get(&self, reg: RegisterId) -> Option<u32> {
        self.regs.get(&reg).map(|v| v.value)
    }

    /// Source text of a register value, if present.
    #[must_use]
    pub fn raw(&self, reg: RegisterId) -> Option<&str> {
        self.regs.get(&reg).map(|v| v.raw.as_str())
    }

    /// Number of canonical registers present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// True if all 32 canonical registers are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.regs.len() == NUM_REGS
    }

    /// Canonical registers absent from this snapshot, ascending.
    #[must_use]
    pub fn missing_registers(&self) -> Vec<RegisterId> {
        RegisterId::all()
            .filter(|reg| !self.regs.contains_key(reg))
            .collect()
    }

    /// Canonical registers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (RegisterId, &RegisterValue)> {
        self.regs.iter().map(|(reg, value)| (*reg, value))
    }

    /// Non-canonical identifiers found while parsing.
    #[must_use]
    pub const fn extras(&self) -> &BTreeMap<String, RegisterValue> {
        &self.extras
    }
}

pub(crate) fn is_comment_or_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

static HEX_PATTERN: OnceLock<Regex> = OnceLock::new();
