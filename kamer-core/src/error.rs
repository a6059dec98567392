//! Error and diagnostic types
//!
//! Hard failures are typed errors that abort one document at most. Everything
//! that degrades gracefully is reported as a [`Diagnostic`] value returned to
//! the caller instead.

use std::fmt;
use thiserror::Error;

/// Lexicon loading errors
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon source is not valid JSON or lacks the expected structure
    #[error("malformed lexicon: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The lexicon source could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An XML lexicon is not well-formed
    #[error("malformed XML lexicon: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An entry carries a missing or non-numeric attribute
    #[error("invalid lexicon entry: {0}")]
    InvalidEntry(String),
}

/// Document-level extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document text is not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element does not belong to a known transcript schema
    #[error("unknown transcript schema with root <{root}>")]
    UnknownSchema {
        /// Tag name of the unrecognised root element
        root: String,
    },

    /// The document contains no markup at all
    #[error("document contains no XML start marker")]
    NoMarkup,
}

impl ExtractError {
    /// Stage at which the document was abandoned
    pub fn stage(&self) -> Stage {
        match self {
            ExtractError::Xml(_) | ExtractError::NoMarkup => Stage::DocumentLoad,
            ExtractError::UnknownSchema { .. } => Stage::SchemaDetect,
        }
    }
}

/// Sentiment scoring errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentimentError {
    /// The scorer did not answer within the configured time
    #[error("sentiment scoring timed out after {0} ms")]
    Timeout(u128),

    /// The scorer failed for another reason
    #[error("sentiment scoring failed: {0}")]
    Failed(String),
}

/// Result type for lexicon operations
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Pipeline stage a diagnostic originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and parsing the lexicon
    LexiconLoad,
    /// Reading and parsing a transcript file
    DocumentLoad,
    /// Resolving the transcript schema
    SchemaDetect,
    /// Recovering the session year range
    YearRange,
    /// Sentence splitting, matching and record building
    Extraction,
    /// Optional sentiment scoring
    Sentiment,
}

impl Stage {
    /// Short name used in status messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::LexiconLoad => "lexicon",
            Stage::DocumentLoad => "load",
            Stage::SchemaDetect => "schema",
            Stage::YearRange => "year",
            Stage::Extraction => "extract",
            Stage::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable status message tagged with the stage that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Failing stage
    pub stage: Stage,
    /// Status message
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}
