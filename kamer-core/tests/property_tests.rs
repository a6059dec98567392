//! Property-based tests for lexicon matching, splitting and retention

use kamer_core::text::{split_sentences, tokenize};
use kamer_core::{
    CountMode, ExtractOptions, Extractor, Lexicon, LexiconGroup, Retention, TextBlock, YearRange,
};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,10}"
}

fn groups() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        ("[a-z]{1,6}", prop::collection::vec(word(), 0..5)),
        1..5,
    )
}

fn build(groups: &[(String, Vec<String>)]) -> Lexicon {
    let groups: Vec<LexiconGroup> = groups
        .iter()
        .map(|(category, forms)| LexiconGroup::new(category.clone(), forms.clone()))
        .collect();
    Lexicon::load(&groups)
}

proptest! {
    #[test]
    fn lookup_ignores_case(groups in groups()) {
        let lexicon = build(&groups);
        for (form, category) in lexicon.entries() {
            prop_assert_eq!(lexicon.lookup(form), Some(category));
            prop_assert_eq!(lexicon.lookup(&form.to_uppercase()), Some(category));
        }
    }

    #[test]
    fn zero_counts_cover_every_key(groups in groups()) {
        let lexicon = build(&groups);

        let compact = lexicon.new_zero_counts(CountMode::Compact);
        prop_assert_eq!(compact.len(), lexicon.categories().count());
        prop_assert_eq!(compact.total(), 0);

        let full = lexicon.new_zero_counts(CountMode::Full);
        prop_assert_eq!(full.len(), lexicon.len());
        prop_assert_eq!(full.total(), 0);

        for mode in [CountMode::Compact, CountMode::Full] {
            prop_assert_eq!(
                lexicon.ordered_output_labels(mode).len(),
                lexicon.new_zero_counts(mode).len()
            );
        }
    }

    #[test]
    fn compact_and_full_totals_agree(groups in groups(), words in prop::collection::vec(word(), 0..20)) {
        let lexicon = build(&groups);
        let compact = lexicon.count_matches(&words, CountMode::Compact);
        let full = lexicon.count_matches(&words, CountMode::Full);
        let expected = words.iter().filter(|w| lexicon.lookup(w).is_some()).count() as u32;
        prop_assert_eq!(compact.total(), expected);
        prop_assert_eq!(full.total(), expected);
    }

    #[test]
    fn sentences_are_trimmed_and_terminator_free(text in "[a-z .?!\n\r]{0,80}") {
        for sentence in split_sentences(&text) {
            prop_assert!(!sentence.is_empty());
            prop_assert_eq!(sentence.trim(), sentence.as_str());
            prop_assert!(!sentence.contains(['.', '?', '!', '\n', '\r']));
        }
    }

    #[test]
    fn tokens_contain_only_word_characters(text in "\\PC{0,60}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn retention_policy_is_a_binary_gate(groups in groups(), text in "[a-zA-Z ,.]{0,120}") {
        let lexicon = build(&groups);
        let block = TextBlock {
            years: Some(YearRange::new(2001, 2002)),
            speaker: "spreker".to_string(),
            affiliation: "partij".to_string(),
            text: Some(text.clone()),
        };
        let sentences = split_sentences(&text);

        let all = Extractor::new(&lexicon, ExtractOptions::builder().retention(Retention::All).build())
            .process_block(&block, &mut Vec::new());
        prop_assert_eq!(all.len(), sentences.len());

        let matching = Extractor::new(&lexicon, ExtractOptions::default())
            .process_block(&block, &mut Vec::new());
        let expected: Vec<_> = all.into_iter().filter(|r| r.counts.has_matches()).collect();
        prop_assert_eq!(matching, expected);
    }
}
