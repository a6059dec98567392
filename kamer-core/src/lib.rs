//! Intensifier extraction from parliamentary debate transcripts
//!
//! This crate finds sentences containing intensifying words (adverbs that
//! strengthen a statement about wealth or poverty) in Dutch parliamentary
//! transcripts and turns each of them into an [`UtteranceRecord`] carrying
//! the session years, speaker, party, per-category (or per-word) match counts
//! and an optional sentiment score.
//!
//! # Architecture
//!
//! - [`lexicon`]: word form → category mapping and count construction
//! - [`text`]: naive sentence splitting and tokenization
//! - [`schema`]: the two supported transcript layouts behind one interface
//! - [`extract`]: the orchestrator producing records per document
//! - [`sentiment`]: the optional scoring capability
//!
//! # Example
//!
//! ```rust
//! use kamer_core::{ExtractOptions, Extractor, Lexicon, LexiconGroup};
//!
//! let lexicon = Lexicon::load(&[
//!     LexiconGroup::new("arm", ["straatarm"]),
//!     LexiconGroup::new("rijk", ["kapitaalkrachtig"]),
//! ]);
//! let extractor = Extractor::new(&lexicon, ExtractOptions::default());
//!
//! let transcript = r#"<handeling>
//!   <frontm><vergjaar>2010-2011</vergjaar></frontm>
//!   <part><item><spreker>
//!     <wie><aanspr>Mevrouw Kant</aanspr><partij>SP</partij></wie>
//!     <al>Die straatarm familie leeft, rijk is zij niet. Dank u.</al>
//!   </spreker></item></part>
//! </handeling>"#;
//!
//! let report = extractor.process_text(transcript).unwrap();
//! assert_eq!(report.records.len(), 1);
//! assert_eq!(report.records[0].counts.get("arm"), 1);
//! assert_eq!(report.records[0].counts.get("rijk"), 0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod schema;
pub mod sentiment;
pub mod text;

pub use config::{CountMode, ExtractOptions, ExtractOptionsBuilder, Retention};
pub use error::{Diagnostic, ExtractError, LexiconError, Result, SentimentError, Stage};
pub use extract::{process_document, DocumentReport, Extractor, UtteranceRecord};
pub use lexicon::{Lexicon, LexiconGroup, MatchCounts};
pub use schema::{TextBlock, Variant, YearRange, UNKNOWN_FIELD};
pub use sentiment::{LexiconSentiment, Sentiment, SentimentScorer, TimeoutScorer};
