//! # ct entry point
//!
//! Parses flags, sets up logging on stderr and runs the transpiler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clct_cli::{run_transpile, TranspileArgs};

/// Container Linux Config Transpiler.
///
/// Converts a Container Linux Config (YAML) into an Ignition config (JSON).
#[derive(Parser, Debug)]
#[command(name = "ct", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    transpile: TranspileArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run_transpile(&cli.transpile) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
