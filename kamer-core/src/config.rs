//! Extraction options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How matches are aggregated into count columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// One column per category
    #[default]
    Compact,
    /// One column per word form
    Full,
}

impl CountMode {
    /// Configuration name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            CountMode::Compact => "compact",
            CountMode::Full => "full",
        }
    }
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(CountMode::Compact),
            "full" => Ok(CountMode::Full),
            other => Err(format!(
                "unknown counting mode '{other}' (expected 'compact' or 'full')"
            )),
        }
    }
}

/// Which sentences become records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Retention {
    /// Every non-empty sentence
    All,
    /// Only sentences with at least one lexicon match
    #[default]
    MatchesOnly,
}

impl Retention {
    /// Parse a retention setting; anything but exactly `all` means matches only
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Retention::All
        } else {
            Retention::MatchesOnly
        }
    }

    /// Configuration name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Retention::All => "all",
            Retention::MatchesOnly => "matches-only",
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOptions {
    /// Counting mode
    pub mode: CountMode,
    /// Retention policy
    pub retention: Retention,
}

impl ExtractOptions {
    /// Create a builder
    pub fn builder() -> ExtractOptionsBuilder {
        ExtractOptionsBuilder::default()
    }
}

/// Builder for [`ExtractOptions`]
#[derive(Debug, Default)]
pub struct ExtractOptionsBuilder {
    options: ExtractOptions,
}

impl ExtractOptionsBuilder {
    /// Set the counting mode
    pub fn mode(mut self, mode: CountMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Set the retention policy
    pub fn retention(mut self, retention: Retention) -> Self {
        self.options.retention = retention;
        self
    }

    /// Build the options
    pub fn build(self) -> ExtractOptions {
        self.options
    }
}
