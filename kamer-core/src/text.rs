//! Sentence splitting and tokenization
//!
//! Deliberately naive: a sentence ends at every `.`, `?` or `!`, so
//! abbreviations such as "Dhr. Jansen" are split as well.

/// Sentence-terminal punctuation
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Replace every run of line-break characters with a single space
pub fn normalize_line_breaks(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                normalized.push(' ');
                in_break = true;
            }
        } else {
            normalized.push(ch);
            in_break = false;
        }
    }
    normalized
}

/// Split running text into trimmed, non-empty sentences.
///
/// The terminator itself is not part of the returned sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    normalize_line_breaks(text)
        .split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

/// Letters, digits and underscore
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Split a sentence into word tokens; casing is left untouched
pub fn tokenize(sentence: &str) -> Vec<&str> {
    sentence
        .split(|ch: char| !is_word_char(ch))
        .filter(|token| !token.is_empty())
        .collect()
}
