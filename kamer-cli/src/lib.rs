//! Kamer CLI library
//!
//! Command-line interface for extracting intensifier counts from Dutch
//! parliamentary debate transcripts.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod report;

pub use error::{CliError, CliResult};
