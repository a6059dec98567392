//! CLI command implementations

use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use kamer_core::CountMode;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract intensifier counts from transcripts
    Process(process::ProcessArgs),

    /// Check intensifier and sentiment lexicons
    Validate(validate::ValidateArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List counting modes
    Modes,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Lines printed for this listing
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Modes => [
                (CountMode::Compact, "one count per lexicon category"),
                (CountMode::Full, "one count per word form"),
            ]
            .iter()
            .map(|(mode, description)| format!("{:<8} {description}", mode.as_str()))
            .collect(),
            ListCommands::Formats => OutputFormat::value_variants()
                .iter()
                .map(|format| {
                    let description = format
                        .to_possible_value()
                        .and_then(|value| value.get_help().map(ToString::to_string))
                        .unwrap_or_default();
                    format!("{:<8} {description}", format.as_str())
                })
                .collect(),
        }
    }
}
