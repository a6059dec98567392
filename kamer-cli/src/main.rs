//! Command-line entry point for kamer

use clap::Parser;
use kamer_cli::commands::Commands;
use kamer_cli::CliResult;

/// Count intensifiers in Dutch parliamentary debate transcripts
#[derive(Debug, Parser)]
#[command(name = "kamer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}
