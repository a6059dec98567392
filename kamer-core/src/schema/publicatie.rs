//! `<officiele-publicatie>` layout

use super::{
    child, field_text, is_tag, outermost, text_content, TextBlock, YearRange, UNKNOWN_FIELD,
};
use roxmltree::{Document, Node};

/// Surname under which the chair is recorded; chair turns are skipped
pub const CHAIR_SURNAME: &str = "voorzitter";

const NAME_PARTS: [&str; 3] = ["voornaam", "voorvoegsels", "achternaam"];

/// Meta names whose content is a publication date
const DATE_META_SUFFIXES: [&str; 2] = [".date", ".issued"];

/// The `content` of the session-year `meta` element, falling back to a
/// date-like `meta` (`*.date`, `*.issued`) that carries a 4-digit number and
/// then to a `vergaderjaar` element in the body.
pub(super) fn year_source(doc: &Document<'_>) -> Option<String> {
    let root = doc.root_element();
    let metas: Vec<Node<'_, '_>> = root
        .descendants()
        .filter(|node| is_tag(node, "meta"))
        .collect();

    let session_year = metas.iter().find_map(|meta| {
        let name = meta.attribute("name")?;
        name.to_ascii_lowercase()
            .ends_with("vergaderjaar")
            .then(|| meta.attribute("content"))
            .flatten()
    });
    if let Some(content) = session_year {
        return Some(content.to_string());
    }

    let dated = metas
        .iter()
        .filter(|meta| meta.attribute("name").is_some_and(is_date_meta))
        .filter_map(|meta| meta.attribute("content"))
        .find(|content| YearRange::parse(content).is_some());
    if let Some(content) = dated {
        return Some(content.to_string());
    }

    root.descendants()
        .find(|node| is_tag(node, "vergaderjaar"))
        .and_then(text_content)
}

fn is_date_meta(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    DATE_META_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Speaker name parts joined with spaces
fn speaker_label(spreker: Node<'_, '_>) -> String {
    let parts: Vec<String> = NAME_PARTS
        .iter()
        .filter_map(|part| field_text(spreker, &["naam", *part]))
        .collect();
    if parts.is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        parts.join(" ")
    }
}

/// Exact match on the untrimmed surname
fn is_chair(spreker: Node<'_, '_>) -> bool {
    child(spreker, "naam")
        .and_then(|naam| child(naam, "achternaam"))
        .and_then(text_content)
        .as_deref()
        == Some(CHAIR_SURNAME)
}

pub(super) fn blocks<'a, 'i: 'a>(
    doc: &'a Document<'i>,
    years: Option<YearRange>,
) -> impl Iterator<Item = TextBlock> + 'a {
    let root = doc.root_element();
    outermost(root, "agendapunt")
        .flat_map(|agendapunt| outermost(agendapunt, "spreekbeurt"))
        .filter(|turn| !child(*turn, "spreker").is_some_and(is_chair))
        .flat_map(move |turn| {
            let spreker = child(turn, "spreker");
            let speaker = spreker
                .map(speaker_label)
                .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
            let affiliation = spreker
                .and_then(|s| field_text(s, &["politiek"]))
                .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
            outermost(turn, "al")
                .map(move |al| TextBlock {
                    years,
                    speaker: speaker.clone(),
                    affiliation: affiliation.clone(),
                    text: text_content(al),
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<officiele-publicatie>
  <metadata>
    <meta name="DC.type" content="Handelingen"/>
    <meta name="OVERHEIDop.vergaderjaar" content="2010-2011"/>
  </metadata>
  <handelingen>
    <agendapunt>
      <spreekbeurt>
        <spreker><naam><achternaam>voorzitter</achternaam></naam></spreker>
        <tekst><al>Ik open de vergadering.</al></tekst>
      </spreekbeurt>
      <spreekbeurt>
        <spreker>
          <naam><voornaam>Jan</voornaam><voorvoegsels>de</voorvoegsels><achternaam>Wit</achternaam></naam>
          <politiek>SP</politiek>
        </spreker>
        <tekst><al>Armoede is schrijnend.</al><al>Echt.</al></tekst>
      </spreekbeurt>
      <spreekbeurt>
        <spreker><naam><achternaam>Voorzitter</achternaam></naam></spreker>
        <tekst><al>Hoofdletter telt niet als voorzitter.</al></tekst>
      </spreekbeurt>
      <spreekbeurt>
        <tekst><al>Geen spreker.</al></tekst>
      </spreekbeurt>
    </agendapunt>
  </handelingen>
</officiele-publicatie>"#;

    #[test]
    fn test_year_source_prefers_session_meta() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(year_source(&doc).as_deref(), Some("2010-2011"));
    }

    #[test]
    fn test_year_source_fallbacks() {
        let doc = Document::parse(
            r#"<officiele-publicatie><metadata><meta name="DC.date" content="2009-11-05"/></metadata></officiele-publicatie>"#,
        )
        .unwrap();
        assert_eq!(year_source(&doc).as_deref(), Some("2009-11-05"));

        let doc = Document::parse(
            "<officiele-publicatie><handelingen><vergaderjaar>2008-2009</vergaderjaar></handelingen></officiele-publicatie>",
        )
        .unwrap();
        assert_eq!(year_source(&doc).as_deref(), Some("2008-2009"));

        let doc = Document::parse("<officiele-publicatie/>").unwrap();
        assert_eq!(year_source(&doc), None);
    }

    #[test]
    fn test_year_source_ignores_non_date_meta() {
        let doc = Document::parse(
            r#"<officiele-publicatie><metadata>
                <meta name="DC.identifier" content="kst-33000-1"/>
                <meta name="OVERHEIDop.publicationIssue" content="2012"/>
            </metadata></officiele-publicatie>"#,
        )
        .unwrap();
        assert_eq!(year_source(&doc), None);

        let doc = Document::parse(
            r#"<officiele-publicatie><metadata>
                <meta name="DC.identifier" content="kst-33000-1"/>
                <meta name="DCTERMS.issued" content="2012-09-18"/>
            </metadata></officiele-publicatie>"#,
        )
        .unwrap();
        assert_eq!(year_source(&doc).as_deref(), Some("2012-09-18"));
    }

    #[test]
    fn test_chair_turns_are_skipped() {
        let doc = Document::parse(SAMPLE).unwrap();
        let blocks: Vec<_> = blocks(&doc, None).collect();
        assert!(blocks
            .iter()
            .all(|b| b.text.as_deref() != Some("Ik open de vergadering.")));
    }

    #[test]
    fn test_chair_match_is_case_sensitive() {
        let doc = Document::parse(SAMPLE).unwrap();
        let blocks: Vec<_> = blocks(&doc, None).collect();
        assert!(blocks.iter().any(|b| b.speaker == "Voorzitter"));
    }

    #[test]
    fn test_padded_chair_surname_is_not_the_chair() {
        let doc = Document::parse(
            "<officiele-publicatie><agendapunt><spreekbeurt>\
             <spreker><naam><achternaam> voorzitter </achternaam></naam></spreker>\
             <tekst><al>Met spaties.</al></tekst>\
             </spreekbeurt></agendapunt></officiele-publicatie>",
        )
        .unwrap();
        let blocks: Vec<_> = blocks(&doc, None).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].speaker, "voorzitter");
        assert_eq!(blocks[0].text.as_deref(), Some("Met spaties."));
    }

    #[test]
    fn test_nested_paragraph_counted_once() {
        let doc = Document::parse(
            "<officiele-publicatie><agendapunt><spreekbeurt>\
             <tekst><al>Buiten <al>binnen</al> weer buiten.</al><al>Tweede.</al></tekst>\
             </spreekbeurt></agendapunt></officiele-publicatie>",
        )
        .unwrap();
        let texts: Vec<_> = blocks(&doc, None).map(|b| b.text).collect();
        assert_eq!(
            texts,
            vec![
                Some("Buiten binnen weer buiten.".to_string()),
                Some("Tweede.".to_string())
            ]
        );
    }

    #[test]
    fn test_speaker_name_parts_and_affiliation() {
        let doc = Document::parse(SAMPLE).unwrap();
        let blocks: Vec<_> = blocks(&doc, None).collect();

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].speaker, "Jan de Wit");
        assert_eq!(blocks[0].affiliation, "SP");
        assert_eq!(blocks[0].text.as_deref(), Some("Armoede is schrijnend."));
        assert_eq!(blocks[1].text.as_deref(), Some("Echt."));
        assert_eq!(blocks[2].affiliation, UNKNOWN_FIELD);
        assert_eq!(blocks[3].speaker, UNKNOWN_FIELD);
        assert_eq!(blocks[3].affiliation, UNKNOWN_FIELD);
    }
}
