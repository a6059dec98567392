//! Transcript loading
//!
//! Transcript files occasionally carry junk lines (banners, stray BOMs) ahead
//! of the XML. Everything before the first line that starts with `<` is
//! dropped before the text is handed to the XML parser.

use crate::error::{ExtractError, Result};
use roxmltree::{Document, ParsingOptions};

const BOM: char = '\u{feff}';

/// Return the slice starting at the first line that opens with `<`.
///
/// Leading whitespace and a byte-order mark on that line are skipped too.
pub fn strip_preamble(raw: &str) -> Option<&str> {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let content = line.trim_start_matches(|ch: char| ch == BOM || ch.is_whitespace());
        if content.starts_with('<') {
            let skipped = line.len() - content.len();
            return Some(&raw[offset + skipped..]);
        }
        offset += line.len();
    }
    None
}

/// Parse transcript text into an XML tree
pub fn parse(raw: &str) -> Result<Document<'_>> {
    let markup = strip_preamble(raw).ok_or(ExtractError::NoMarkup)?;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(markup, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_preamble_keeps_clean_document() {
        let raw = "<?xml version=\"1.0\"?>\n<handeling/>";
        assert_eq!(strip_preamble(raw), Some(raw));
    }

    #[test]
    fn test_strip_preamble_drops_leading_lines() {
        let raw = "Gedownload van de website\r\n\n<handeling/>\n";
        assert_eq!(strip_preamble(raw), Some("<handeling/>\n"));
    }

    #[test]
    fn test_strip_preamble_skips_bom() {
        let raw = "\u{feff}<handeling/>";
        assert_eq!(strip_preamble(raw), Some("<handeling/>"));
    }

    #[test]
    fn test_strip_preamble_without_markup() {
        assert_eq!(strip_preamble("alleen tekst\nzonder tags"), None);
    }

    #[test]
    fn test_parse_with_preamble() {
        let doc = parse("kop\n<handeling><frontm/></handeling>").unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "handeling");
    }

    #[test]
    fn test_parse_allows_doctype() {
        let raw = "<!DOCTYPE officiele-publicatie>\n<officiele-publicatie/>";
        let doc = parse(raw).unwrap();
        assert_eq!(
            doc.root_element().tag_name().name(),
            "officiele-publicatie"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("geen xml"), Err(ExtractError::NoMarkup)));
        assert!(matches!(parse("<handeling>"), Err(ExtractError::Xml(_))));
    }
}
