//! Configuration module
//!
//! Settings are read from an optional TOML file; command-line flags take
//! precedence over anything configured there.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct KamerConfig {
    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Sentiment configuration
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl KamerConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse configuration")
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }
}

/// Extraction-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Intensifier lexicon (JSON)
    pub adverbs: Option<PathBuf>,

    /// Counting mode: "compact" or "full"
    pub mode: String,

    /// Retention: "all", anything else keeps matching sentences only
    pub retention: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            adverbs: None,
            mode: "compact".to_string(),
            retention: "matches".to_string(),
        }
    }
}

/// Sentiment-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct SentimentConfig {
    /// Score retained sentences
    pub enabled: bool,

    /// Sentiment lexicon (XML)
    pub lexicon: Option<PathBuf>,

    /// Per-sentence timeout in milliseconds (0 = none)
    pub timeout_ms: u64,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Process documents in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}
