//! Transcript schema adapter
//!
//! Two transcript layouts are supported, told apart by the root element:
//!
//! - `<handeling>`: session year in `frontm/vergjaar`, speech in
//!   `part/item/spreker/al`
//! - `<officiele-publicatie>`: session year in the metadata block, speech in
//!   `agendapunt/spreekbeurt/tekst/al`
//!
//! Both yield the same [`TextBlock`] stream, one block per `al` paragraph.

mod handeling;
mod publicatie;

pub use publicatie::CHAIR_SURNAME;

use crate::error::{ExtractError, Result};
use regex::Regex;
use roxmltree::{Document, Node};
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Placeholder for an absent speaker label or affiliation
pub const UNKNOWN_FIELD: &str = "unknown";

/// Root tag of the `handeling` layout
pub const HANDELING_ROOT: &str = "handeling";

/// Root tag of the `officiele-publicatie` layout
pub const PUBLICATIE_ROOT: &str = "officiele-publicatie";

/// Supported transcript layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Root `<handeling>`
    Handeling,
    /// Root `<officiele-publicatie>`
    OfficielePublicatie,
}

impl Variant {
    /// Resolve the layout from the root element's tag
    pub fn detect(doc: &Document<'_>) -> Result<Self> {
        let root = doc.root_element().tag_name().name();
        match root {
            HANDELING_ROOT => Ok(Variant::Handeling),
            PUBLICATIE_ROOT => Ok(Variant::OfficielePublicatie),
            other => Err(ExtractError::UnknownSchema {
                root: other.to_string(),
            }),
        }
    }

    /// Root tag name of the layout
    pub fn root_tag(&self) -> &'static str {
        match self {
            Variant::Handeling => HANDELING_ROOT,
            Variant::OfficielePublicatie => PUBLICATIE_ROOT,
        }
    }

    /// Raw text the session year is read from, if the document has one
    pub fn year_source(&self, doc: &Document<'_>) -> Option<String> {
        match self {
            Variant::Handeling => handeling::year_source(doc),
            Variant::OfficielePublicatie => publicatie::year_source(doc),
        }
    }

    /// Session year range, `None` when no 4-digit year can be found
    pub fn year_range(&self, doc: &Document<'_>) -> Option<YearRange> {
        self.year_source(doc)
            .as_deref()
            .and_then(YearRange::parse)
    }

    /// Lazily walk the text blocks of the document in document order
    pub fn blocks<'a>(&self, doc: &'a Document<'_>) -> Box<dyn Iterator<Item = TextBlock> + 'a> {
        let years = self.year_range(doc);
        match self {
            Variant::Handeling => Box::new(handeling::blocks(doc, years)),
            Variant::OfficielePublicatie => Box::new(publicatie::blocks(doc, years)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

/// Session year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    /// First year
    pub start: u16,
    /// Last year, equal to `start` for single-year sessions
    pub end: u16,
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"))
}

impl YearRange {
    /// Create a range
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Scan `source` for 4-digit groups: one group is a single year, the
    /// first two groups of a longer run form the range.
    pub fn parse(source: &str) -> Option<Self> {
        let mut groups = year_pattern()
            .find_iter(source)
            .filter_map(|m| m.as_str().parse::<u16>().ok());
        let start = groups.next()?;
        let end = groups.next().unwrap_or(start);
        Some(Self { start, end })
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One raw paragraph with the metadata of its speaker turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Session year range of the document
    pub years: Option<YearRange>,
    /// Speaker label (honorific or name)
    pub speaker: String,
    /// Party affiliation
    pub affiliation: String,
    /// Paragraph text, `None` when the paragraph has no text content
    pub text: Option<String>,
}

pub(crate) fn is_tag(node: &Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

/// First child element named `tag`
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, tag: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|c| is_tag(c, tag))
}

/// Trimmed text of the element reached by following `path` from `node`
pub(crate) fn field_text(node: Node<'_, '_>, path: &[&str]) -> Option<String> {
    let mut current = node;
    for tag in path {
        current = child(current, tag)?;
    }
    let text = text_content(current)?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Concatenated descendant text, `None` when the element holds no text
pub(crate) fn text_content(node: Node<'_, '_>) -> Option<String> {
    let mut text = String::new();
    for piece in node.descendants().filter(|n| n.is_text()) {
        if let Some(value) = piece.text() {
            text.push_str(value);
        }
    }
    (!text.is_empty()).then_some(text)
}

/// Elements named `tag` below `scope` that are not nested in another `tag`
pub(crate) fn outermost<'a, 'i: 'a>(
    scope: Node<'a, 'i>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    scope.descendants().skip(1).filter(move |node| {
        is_tag(node, tag)
            && node
                .ancestors()
                .skip(1)
                .take_while(|ancestor| *ancestor != scope)
                .all(|ancestor| !is_tag(&ancestor, tag))
    })
}
