//! regcmp CLI - RISC-V register snapshot comparison

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.silent {
        "error"
    } else {
        "info"
    };
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), default_level);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    terminal::set_quiet(cli.silent);

    let exit_code = commands::run_command(&cli);
    std::process::exit(exit_code);
}

/// `RUST_LOG` wins when set and valid; otherwise both crates log at `default_level`.
fn log_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| {
            EnvFilter::new(format!("regcmp={default_level},regcmp_core={default_level}"))
        })
}
