//! Rendering a [`DiffReport`] for people or tools.
//!
//! The diff engine produces a structured report; renderers turn it into text.
//! New output formats implement [`ReportRenderer`] without touching the diff.

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::{DiffReport, NUM_REGS};

/// Turns a diff report into printable output.
pub trait ReportRenderer {
    /// Render the full report.
    fn render(&self, report: &DiffReport) -> String;
}

/// Match rate as a percentage with one decimal place, rounded half-up.
///
/// ```
/// assert_eq!(regcmp_core::report::format_match_rate(32), "100.0%");
/// assert_eq!(regcmp_core::report::format_match_rate(2), "6.3%");
/// ```
#[must_use]
pub fn format_match_rate(match_count: usize) -> String {
    // Tenths of a percent: count * 1000 / 32, rounded half-up in integers.
    let tenths = (match_count * 2000 + NUM_REGS) / (2 * NUM_REGS);
    format!("{}.{}%", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_rate_rounding() {
        assert_eq!(format_match_rate(0), "0.0%");
        assert_eq!(format_match_rate(1), "3.1%");
        assert_eq!(format_match_rate(2), "6.3%");
        assert_eq!(format_match_rate(5), "15.6%");
        assert_eq!(format_match_rate(28), "87.5%");
        assert_eq!(format_match_rate(31), "96.9%");
        assert_eq!(format_match_rate(32), "100.0%");
    }
}
