//! regcmp-core - RISC-V register snapshot comparison
//!
//! Parses register snapshots, diffs a golden snapshot against an actual one
//! across the 32-entry integer register file, and renders divergence reports
//! with register-specific diagnostic hints.
//!
//! # Example
//!
//! ```
//! use regcmp_core::{DiffReport, RegisterSnapshot, ReportRenderer, TextRenderer};
//!
//! let golden = RegisterSnapshot::parse_line("x04=0x5980edb5").snapshot;
//! let actual = RegisterSnapshot::parse_line("x04=0xd7b839d9").snapshot;
//! let report = DiffReport::compare(&golden, &actual);
//! let text = TextRenderer::default().render(&report);
//! assert!(text.contains("+0x7e374c24"));
//! ```

pub mod batch;
pub mod diff;
mod error;
pub mod hints;
pub mod imem;
mod register;
pub mod report;
pub mod snapshot;

pub use batch::{BatchOutcome, compare_all};
pub use diff::{DiffEntry, DiffReport, DiffStatus, diff_snapshots};
pub use error::{Error, Result};
pub use hints::{Hint, HintTable, REVIEW_CHECKLIST};
pub use imem::HexImage;
pub use register::{NUM_REGS, RegisterId};
pub use report::{JsonRenderer, ReportRenderer, TextRenderer};
pub use snapshot::{ParseIssue, ParsedSnapshot, RegisterSnapshot, RegisterValue, format_hex};
