//! `<handeling>` layout

use super::{child, field_text, outermost, text_content, TextBlock, YearRange, UNKNOWN_FIELD};
use roxmltree::{Document, Node};

pub(super) fn year_source(doc: &Document<'_>) -> Option<String> {
    field_text(doc.root_element(), &["frontm", "vergjaar"])
}

/// Honorific and party of a `spreker`, from its `wie` wrapper
fn speaker_fields(spreker: Node<'_, '_>) -> (String, String) {
    let wie = child(spreker, "wie");
    let field = |tag: &str| {
        wie.and_then(|wie| field_text(wie, &[tag]))
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
    };
    (field("aanspr"), field("partij"))
}

pub(super) fn blocks<'a, 'i: 'a>(
    doc: &'a Document<'i>,
    years: Option<YearRange>,
) -> impl Iterator<Item = TextBlock> + 'a {
    let root = doc.root_element();
    outermost(root, "part")
        .flat_map(|part| outermost(part, "item"))
        .flat_map(|item| outermost(item, "spreker"))
        .flat_map(move |spreker| {
            let (speaker, affiliation) = speaker_fields(spreker);
            outermost(spreker, "al")
                .map(move |al| TextBlock {
                    years,
                    speaker: speaker.clone(),
                    affiliation: affiliation.clone(),
                    text: text_content(al),
                })
        })
}
