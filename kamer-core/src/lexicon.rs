//! Intensifier lexicon
//!
//! Maps lower-cased word forms to a category label and keeps the distinct
//! categories in first-seen order. The lexicon is immutable once built and is
//! shared read-only between documents (and threads).

use crate::config::CountMode;
use crate::error::{Diagnostic, LexiconResult, Stage};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One group of word forms sharing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconGroup {
    /// Category label, e.g. `arm` or `rijk`
    #[serde(rename = "type")]
    pub category: String,
    /// Word forms belonging to the category
    #[serde(rename = "form", default)]
    pub forms: Vec<String>,
}

impl LexiconGroup {
    /// Create a group from a category and its forms
    pub fn new<I, S>(category: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            forms: forms.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk lexicon document: `{"words": [{"type": .., "form": [..]}]}`
#[derive(Debug, Deserialize)]
struct LexiconDocument {
    words: Vec<LexiconGroup>,
}

/// Word-form to category mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    /// Lower-cased word form -> category, in load order
    entries: IndexMap<String, String>,
    categories: IndexSet<String>,
}

impl Lexicon {
    /// Build a lexicon from already-parsed groups.
    ///
    /// A form listed twice keeps its first position but takes the category of
    /// the last occurrence.
    pub fn load(groups: &[LexiconGroup]) -> Self {
        let mut lexicon = Self::default();
        for group in groups {
            lexicon.categories.insert(group.category.clone());
            for form in &group.forms {
                lexicon
                    .entries
                    .insert(form.to_lowercase(), group.category.clone());
            }
        }
        lexicon
    }

    /// Parse a JSON lexicon document strictly
    pub fn from_json_str(source: &str) -> LexiconResult<Self> {
        let document: LexiconDocument = serde_json::from_str(source)?;
        Ok(Self::load(&document.words))
    }

    /// Read and parse a JSON lexicon file strictly
    pub fn from_json_file(path: &Path) -> LexiconResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Parse a JSON lexicon document, degrading to an empty lexicon on error.
    ///
    /// The returned diagnostic is set whenever the empty fallback was used.
    pub fn load_lenient(source: &str) -> (Self, Option<Diagnostic>) {
        Self::or_empty(Self::from_json_str(source))
    }

    /// Read and parse a JSON lexicon file, degrading to an empty lexicon when
    /// the file cannot be read or parsed.
    pub fn load_file_lenient(path: &Path) -> (Self, Option<Diagnostic>) {
        Self::or_empty(Self::from_json_file(path))
    }

    fn or_empty(loaded: LexiconResult<Self>) -> (Self, Option<Diagnostic>) {
        match loaded {
            Ok(lexicon) => (lexicon, None),
            Err(err) => {
                log::warn!("lexicon could not be loaded, continuing with an empty one: {err}");
                (
                    Self::default(),
                    Some(Diagnostic::new(Stage::LexiconLoad, err.to_string())),
                )
            }
        }
    }

    /// Category of `word`, compared case-insensitively
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Number of distinct word forms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no word forms are loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// `(word_form, category)` pairs in load order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(form, category)| (form.as_str(), category.as_str()))
    }

    /// A count object with every key of `mode` present at zero
    pub fn new_zero_counts(&self, mode: CountMode) -> MatchCounts {
        let keys: Vec<&String> = match mode {
            CountMode::Compact => self.categories.iter().collect(),
            CountMode::Full => self.entries.keys().collect(),
        };
        MatchCounts(keys.into_iter().map(|key| (key.clone(), 0)).collect())
    }

    /// Column labels matching the key order of [`Lexicon::new_zero_counts`].
    ///
    /// Full mode labels read `category.word_form`.
    pub fn ordered_output_labels(&self, mode: CountMode) -> Vec<String> {
        match mode {
            CountMode::Compact => self.categories.iter().cloned().collect(),
            CountMode::Full => self
                .entries
                .iter()
                .map(|(form, category)| format!("{category}.{form}"))
                .collect(),
        }
    }

    /// Count lexicon matches among `tokens` into a fresh count object
    pub fn count_matches<I, S>(&self, tokens: I, mode: CountMode) -> MatchCounts
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = self.new_zero_counts(mode);
        for token in tokens {
            let lowered = token.as_ref().to_lowercase();
            if let Some((form, category)) = self.entries.get_key_value(&lowered) {
                let key = match mode {
                    CountMode::Compact => category,
                    CountMode::Full => form,
                };
                counts.increment(key);
            }
        }
        counts
    }
}

/// Per-sentence match counts with a stable, complete key set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchCounts(IndexMap<String, u32>);

impl MatchCounts {
    fn increment(&mut self, key: &str) {
        if let Some(count) = self.0.get_mut(key) {
            *count += 1;
        }
    }

    /// Count for `key`, zero when the key is unknown
    pub fn get(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// True when any count is non-zero
    pub fn has_matches(&self) -> bool {
        self.0.values().any(|&count| count > 0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no keys at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(key, count)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(key, &count)| (key.as_str(), count))
    }

    /// Counts in column order
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.values().copied()
    }
}
