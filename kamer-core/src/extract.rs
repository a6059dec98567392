//! Utterance extraction
//!
//! Turns the text blocks of one transcript into utterance records: every
//! block is split into sentences, each sentence is tokenized and matched
//! against the lexicon, and the sentences passing the retention policy become
//! records. Nothing is carried over between sentences or between documents,
//! so processing the same document twice yields identical output.

use crate::config::{ExtractOptions, Retention};
use crate::document;
use crate::error::{Diagnostic, Result, Stage};
use crate::lexicon::{Lexicon, MatchCounts};
use crate::schema::{TextBlock, Variant, YearRange};
use crate::sentiment::{Sentiment, SentimentScorer};
use crate::text::{split_sentences, tokenize};
use roxmltree::Document;
use serde::Serialize;

/// One retained sentence with its metadata and match counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtteranceRecord {
    /// Session year range of the document
    pub years: Option<YearRange>,
    /// Speaker label
    pub speaker: String,
    /// Party affiliation
    pub affiliation: String,
    /// Sentence text, trimmed and without its terminator
    pub sentence: String,
    /// Lexicon match counts
    pub counts: MatchCounts,
    /// Sentiment of the raw sentence, when a scorer was available
    pub sentiment: Option<Sentiment>,
}

/// Outcome of processing one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    /// Detected transcript layout
    pub variant: Variant,
    /// Session year range, `None` when unknown
    pub years: Option<YearRange>,
    /// Records in document order
    pub records: Vec<UtteranceRecord>,
    /// Non-fatal problems met along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Extracts utterance records from parsed transcripts
pub struct Extractor<'a> {
    lexicon: &'a Lexicon,
    options: ExtractOptions,
    scorer: Option<&'a dyn SentimentScorer>,
}

impl<'a> Extractor<'a> {
    /// Create an extractor without sentiment scoring
    pub fn new(lexicon: &'a Lexicon, options: ExtractOptions) -> Self {
        Self {
            lexicon,
            options,
            scorer: None,
        }
    }

    /// Attach a sentiment scorer
    pub fn with_scorer(mut self, scorer: &'a dyn SentimentScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// The active options
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Parse raw transcript text and process it
    pub fn process_text(&self, raw: &str) -> Result<DocumentReport> {
        let doc = document::parse(raw)?;
        self.process_document(&doc)
    }

    /// Process one parsed transcript.
    ///
    /// Fails only when the document's layout is unknown.
    pub fn process_document(&self, doc: &Document<'_>) -> Result<DocumentReport> {
        let variant = Variant::detect(doc)?;
        let mut diagnostics = Vec::new();

        let years = match variant.year_source(doc) {
            Some(source) => {
                let years = YearRange::parse(&source);
                if years.is_none() {
                    diagnostics.push(Diagnostic::new(
                        Stage::YearRange,
                        format!("no 4-digit year in session year '{}'", source.trim()),
                    ));
                }
                years
            }
            None => {
                diagnostics.push(Diagnostic::new(
                    Stage::YearRange,
                    format!("<{variant}> document has no session year"),
                ));
                None
            }
        };

        let mut records = Vec::new();
        for block in variant.blocks(doc) {
            records.extend(self.process_block(&block, &mut diagnostics));
        }

        log::debug!(
            "<{variant}> document: {} records, {} diagnostics",
            records.len(),
            diagnostics.len()
        );

        Ok(DocumentReport {
            variant,
            years,
            records,
            diagnostics,
        })
    }

    /// Records for the retained sentences of one block.
    ///
    /// A block without text content yields nothing.
    pub fn process_block(
        &self,
        block: &TextBlock,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<UtteranceRecord> {
        let Some(text) = block.text.as_deref() else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for sentence in split_sentences(text) {
            let counts = self
                .lexicon
                .count_matches(tokenize(&sentence), self.options.mode);
            if !self.retain(&counts) {
                continue;
            }
            let sentiment = self.score(&sentence, diagnostics);
            records.push(UtteranceRecord {
                years: block.years,
                speaker: block.speaker.clone(),
                affiliation: block.affiliation.clone(),
                sentence,
                counts,
                sentiment,
            });
        }
        records
    }

    fn retain(&self, counts: &MatchCounts) -> bool {
        self.options.retention == Retention::All || counts.has_matches()
    }

    fn score(&self, sentence: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Sentiment> {
        let scorer = self.scorer?;
        match scorer.score(sentence) {
            Ok(sentiment) => Some(sentiment),
            Err(err) => {
                log::debug!("sentiment unavailable for '{sentence}': {err}");
                diagnostics.push(Diagnostic::new(Stage::Sentiment, err.to_string()));
                None
            }
        }
    }
}

/// Process one parsed transcript without sentiment scoring
pub fn process_document(
    doc: &Document<'_>,
    lexicon: &Lexicon,
    options: ExtractOptions,
) -> Result<DocumentReport> {
    Extractor::new(lexicon, options).process_document(doc)
}
