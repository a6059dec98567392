//! Output formatting module

use anyhow::{Context, Result};
use kamer_core::UtteranceRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single record
    fn write_record(&mut self, record: &UtteranceRecord) -> Result<()>;

    /// Finalize output (e.g., close JSON array) and flush
    fn finish(&mut self) -> Result<()>;
}

pub mod csv;
pub mod json;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One row per record, count columns in lexicon order
    Csv,
    /// Pretty-printed JSON array of records
    Json,
}

impl OutputFormat {
    /// File extension, also the name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name from a configuration file
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// File name used when the output path is a directory
    pub fn default_file_name(&self) -> String {
        format!("{DEFAULT_OUTPUT_STEM}.{}", self.as_str())
    }
}

/// Stem of the output file written into an output directory
pub const DEFAULT_OUTPUT_STEM: &str = "intensifiers";

/// Open the output destination: stdout when `path` is `None`, a file inside
/// it when `path` is an existing directory, the file itself otherwise.
pub fn open_destination(
    path: Option<&Path>,
    format: OutputFormat,
) -> Result<Box<dyn Write + Send + Sync>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    };

    let target = if path.is_dir() {
        path.join(format.default_file_name())
    } else {
        path.to_path_buf()
    };
    log::info!("Writing {} output to {}", format.as_str(), target.display());

    let file = File::create(&target)
        .with_context(|| format!("Failed to create output file: {}", target.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Build the formatter for `format`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    count_labels: Vec<String>,
    with_sentiment: bool,
) -> Result<Box<dyn OutputFormatter>> {
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer, count_labels, with_sentiment)?),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    })
}
