//! Instruction memory image generation from `.hex` files.
//!
//! A `.hex` file holds one 32-bit instruction word per line as exactly eight
//! hex digits. The generated Verilog initializes `imem[]` in order and fills
//! the rest of the memory with NOPs.

use std::fmt::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::error::read_source;
use crate::{Error, Result};

/// `addi x0, x0, 0`.
pub const NOP: u32 = 0x0000_0013;

/// Instructions per group comment in the generated Verilog.
const GROUP_SIZE: usize = 20;

/// A skipped line in a `.hex` file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: expected 8 hex digits, got {text:?}")]
pub struct HexLineIssue {
    pub line: usize,
    pub text: String,
}

/// One instruction word and the source line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// 1-based source line.
    pub line: usize,
    pub word: u32,
}

/// Parsed contents of a `.hex` file.
#[derive(Debug, Clone, Default)]
pub struct HexImage {
    pub instructions: Vec<Instruction>,
    pub issues: Vec<HexLineIssue>,
}

impl HexImage {
    /// Parse `.hex` text. Blank lines and `//` comments are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the built-in word pattern fails to compile.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let pattern = WORD_PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{8}$").unwrap());
        let mut image = Self::default();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let word = pattern
                .is_match(line)
                .then(|| u32::from_str_radix(line, 16).ok())
                .flatten();
            if let Some(word) = word {
                image.instructions.push(Instruction {
                    line: line_no,
                    word,
                });
            } else {
                let issue = HexLineIssue {
                    line: line_no,
                    text: line.to_string(),
                };
                warn!("{issue}");
                image.issues.push(issue);
            }
        }
        image
    }

    /// Load and parse a `.hex` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSourceFile`] if the path does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::parse(&read_source(path)?))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Render Verilog `imem[...]` assignments followed by a NOP fill loop.
    ///
    /// With `imem_size`, the fill loop uses that numeric bound and the image
    /// must fit; otherwise the loop is bounded by the `IMEM_SIZE` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImemOverflow`] if the image exceeds `imem_size`.
    pub fn to_verilog(&self, imem_size: Option<usize>) -> Result<String> {
        if let Some(capacity) = imem_size.filter(|&capacity| self.len() > capacity) {
            return Err(Error::ImemOverflow {
                count: self.len(),
                capacity,
            });
        }
        let bound = imem_size.map_or_else(|| "IMEM_SIZE".to_string(), |n| n.to_string());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "// === instruction sequence ({} words) ===",
            self.len()
        );
        for (i, instr) in self.instructions.iter().enumerate() {
            let _ = writeln!(
                out,
                "            imem[{i:3}] = 32'h{:08x};  // line {:3}",
                instr.word, instr.line
            );
            if (i + 1) % GROUP_SIZE == 0 {
                let _ = writeln!(out, "            // --- instruction {} ---", i + 1);
            }
        }

        let total = self.len();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "            // fill remaining entries with NOP (from index {total})"
        );
        let _ = writeln!(
            out,
            "            for (i = {total}; i < {bound}; i = i + 1) begin"
        );
        let _ = writeln!(out, "                imem[i] = 32'h{NOP:08x};  // NOP");
        let _ = writeln!(out, "            end");
        Ok(out)
    }
}

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();
