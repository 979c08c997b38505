//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure (including any register divergence).
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "regcmp")]
#[command(about = "RISC-V register snapshot comparison - diagnose divergence from a golden run")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare an actual register snapshot against a golden one
    Compare {
        /// Golden (reference) snapshot file of `xNN=0x...` tokens
        #[arg(value_name = "GOLDEN")]
        golden: PathBuf,

        /// Actual snapshot file produced by the CPU under test
        #[arg(value_name = "ACTUAL")]
        actual: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        hints: HintArgs,
    },
    /// Compare every snapshot line of a file against one golden snapshot
    Batch {
        /// Golden (reference) snapshot file
        #[arg(value_name = "GOLDEN")]
        golden: PathBuf,

        /// File with one actual snapshot per line
        #[arg(value_name = "ACTUALS")]
        actuals: PathBuf,

        /// Number of worker threads (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        #[command(flatten)]
        hints: HintArgs,
    },
    /// Convert a .hex instruction file into Verilog imem initialization
    Imem {
        /// Input hex file (one 8-digit word per line)
        #[arg(value_name = "HEX_FILE")]
        input: PathBuf,

        /// Instruction memory depth; defaults to the IMEM_SIZE parameter
        #[arg(long, value_name = "WORDS")]
        imem_size: Option<usize>,
    },
}

/// Diagnostic hint table options.
#[derive(Args, Clone, Debug, Default)]
pub struct HintArgs {
    /// JSON hint table: [{"register": "x04", "hint": "..."}]
    #[arg(long, value_name = "FILE")]
    pub hints: Option<PathBuf>,

    /// Start from an empty table instead of the built-in hints
    #[arg(long)]
    pub no_default_hints: bool,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "regcmp", "compare", "g.txt", "a.txt", "--format", "json", "--hints", "h.json",
        ])
        .unwrap();
        let Commands::Compare {
            golden,
            actual,
            format,
            hints,
        } = cli.command
        else {
            panic!("expected compare");
        };
        assert_eq!(golden, PathBuf::from("g.txt"));
        assert_eq!(actual, PathBuf::from("a.txt"));
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(hints.hints, Some(PathBuf::from("h.json")));
        assert!(!hints.no_default_hints);
    }

    #[test]
    fn test_parse_batch_jobs() {
        let args = ["regcmp", "-v", "batch", "g.txt", "runs", "-j", "4"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Batch { jobs: 4, .. }));
    }

    #[test]
    fn test_verbose_conflicts_with_silent() {
        assert!(Cli::try_parse_from(["regcmp", "-v", "-s", "imem", "x.hex"]).is_err());
    }
}
