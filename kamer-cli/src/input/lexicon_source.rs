//! Loading the intensifier and sentiment lexicons from disk

use super::FileReader;
use crate::error::CliError;
use anyhow::Result;
use kamer_core::{Diagnostic, Lexicon, LexiconSentiment};
use std::path::Path;

/// Load the intensifier lexicon.
///
/// A missing file is an error. A file that cannot be read or parsed yields
/// an empty lexicon and a diagnostic, so the run still produces (empty) output.
pub fn load_adverbs(path: &Path) -> Result<(Lexicon, Option<Diagnostic>)> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    let (lexicon, diagnostic) = Lexicon::load_file_lenient(path);

    log::info!(
        "Loaded {} lexicon forms in {} categories from {}",
        lexicon.len(),
        lexicon.categories().count(),
        path.display()
    );
    Ok((lexicon, diagnostic))
}

/// Load the sentiment lexicon.
///
/// Sentiment is optional: any failure is logged and scoring is disabled.
pub fn load_sentiment(path: &Path) -> Option<LexiconSentiment> {
    let loaded = FileReader::read_text(path).and_then(|source| {
        LexiconSentiment::from_xml_str(&source)
            .map_err(|e| CliError::InvalidLexicon(e.to_string()).into())
    });

    match loaded {
        Ok(scorer) => {
            log::info!(
                "Loaded {} sentiment entries from {}",
                scorer.len(),
                path.display()
            );
            Some(scorer)
        }
        Err(e) => {
            log::warn!("Sentiment scoring disabled: {e:#}");
            None
        }
    }
}
