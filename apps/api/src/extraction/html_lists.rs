//! Locates skill-bearing HTML lists.
//!
//! A paragraph whose text mentions requirements, tech, skills or experience is
//! treated as a section header; an `<ul>`/`<ol>` among the siblings that follow
//! it is taken as the list of skills.

use std::str::FromStr;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extraction::ParseOptionError;

/// Substrings (matched against lowercased paragraph text) that mark a section header.
pub const SECTION_KEYWORDS: &[&str] = &["requirement", "tech", "skill", "experience"];

pub const DEFAULT_SIBLINGS_EXAMINED: usize = 2;

/// Fixed iteration budget of the legacy scan.
const LEGACY_SCAN_ITERATIONS: usize = 2;

lazy_static! {
    static ref PARAGRAPH_SELECTOR: Selector = Selector::parse("p").unwrap();
    static ref LIST_ITEM_SELECTOR: Selector = Selector::parse("li").unwrap();
}

/// How siblings after a header paragraph are walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiblingScan {
    /// Two fixed iterations. A whitespace-only sibling uses up an iteration, a
    /// non-blank non-list sibling (a non-empty comment included) stalls the
    /// cursor, and a list found on the first iteration is reported again on the
    /// second.
    Legacy,
    /// Skip every whitespace-only sibling and every comment, then examine the
    /// next N real ones.
    #[default]
    Corrected,
}

impl FromStr for SiblingScan {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(SiblingScan::Legacy),
            "corrected" => Ok(SiblingScan::Corrected),
            other => Err(ParseOptionError::new("sibling scan", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "ol" => Some(ListKind::Ordered),
            "ul" => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

/// A list believed to enumerate skills, detached from the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCandidate {
    pub kind: ListKind,
    /// Text of the paragraph that triggered the selection.
    pub trigger: String,
    /// Plain text of every `<li>` in the list, nested items included.
    pub items: Vec<String>,
}

/// Outcome of scanning a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionScan {
    Lists(Vec<ListCandidate>),
    /// No candidate list; carries the flat text for the keyword fallback.
    FlatText(String),
}

/// Parses `description` and either returns the candidate lists or, when there
/// are none, the document's flat text.
///
/// The parsed document does not outlive this call.
pub fn scan_description(
    description: &str,
    scan: SiblingScan,
    siblings_examined: usize,
) -> DescriptionScan {
    let document = Html::parse_fragment(description);
    let candidates = locate_skill_lists(&document, scan, siblings_examined);

    if candidates.is_empty() {
        DescriptionScan::FlatText(flat_text(&document))
    } else {
        DescriptionScan::Lists(candidates)
    }
}

pub fn locate_skill_lists(
    document: &Html,
    scan: SiblingScan,
    siblings_examined: usize,
) -> Vec<ListCandidate> {
    let mut candidates = Vec::new();

    for paragraph in document.select(&PARAGRAPH_SELECTOR) {
        let trigger: String = paragraph.text().collect();
        if !is_section_header(&trigger) {
            continue;
        }

        let siblings = paragraph.next_siblings().map(|node| match ElementRef::wrap(node) {
            Some(element) => Sibling::Element(element),
            None => match node.value().as_comment() {
                Some(comment) => Sibling::Comment(&**comment),
                None => Sibling::Text(node.value().as_text().map(|text| &**text).unwrap_or("")),
            },
        });

        let lists = match scan {
            SiblingScan::Legacy => scan_legacy(siblings),
            SiblingScan::Corrected => scan_corrected(siblings, siblings_examined),
        };

        for (kind, list) in lists {
            let items: Vec<String> = list
                .select(&LIST_ITEM_SELECTOR)
                .map(|item| item.text().collect())
                .collect();
            debug!(
                trigger = trigger.trim(),
                ?kind,
                items = items.len(),
                "Found skill list candidate"
            );
            candidates.push(ListCandidate {
                kind,
                trigger: trigger.trim().to_string(),
                items,
            });
        }
    }

    candidates
}

pub fn is_section_header(text: &str) -> bool {
    let text = text.to_lowercase();
    SECTION_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Text of every top-level node, joined with single spaces.
fn flat_text(document: &Html) -> String {
    document
        .root_element()
        .children()
        .map(|node| match ElementRef::wrap(node) {
            Some(element) => element.text().collect::<String>(),
            None => node
                .value()
                .as_text()
                .map(|text| text.to_string())
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

enum Sibling<'a> {
    Element(ElementRef<'a>),
    /// Text node; other non-element nodes (doctype, processing instructions) read as empty text.
    Text(&'a str),
    /// Comment body. Blank only if the body is.
    Comment(&'a str),
}

impl<'a> Sibling<'a> {
    fn is_blank(&self) -> bool {
        match self {
            Sibling::Element(element) => element.text().all(|t| t.trim().is_empty()),
            Sibling::Text(text) | Sibling::Comment(text) => text.trim().is_empty(),
        }
    }

    fn is_comment(&self) -> bool {
        matches!(self, Sibling::Comment(_))
    }

    fn as_list(&self) -> Option<(ListKind, ElementRef<'a>)> {
        match self {
            Sibling::Element(element) => {
                ListKind::from_tag(element.value().name()).map(|kind| (kind, *element))
            }
            Sibling::Text(_) | Sibling::Comment(_) => None,
        }
    }
}

fn scan_legacy<'a>(
    mut siblings: impl Iterator<Item = Sibling<'a>>,
) -> Vec<(ListKind, ElementRef<'a>)> {
    let mut found = Vec::new();
    let mut cursor = siblings.next();

    for _ in 0..LEGACY_SCAN_ITERATIONS {
        let Some(sibling) = &cursor else {
            continue;
        };
        let blank = sibling.is_blank();
        let list = sibling.as_list();

        if blank {
            cursor = siblings.next();
        } else if let Some(list) = list {
            found.push(list);
        }
    }

    found
}

fn scan_corrected<'a>(
    siblings: impl Iterator<Item = Sibling<'a>>,
    examined: usize,
) -> Vec<(ListKind, ElementRef<'a>)> {
    siblings
        .filter(|sibling| !sibling.is_blank() && !sibling.is_comment())
        .take(examined)
        .filter_map(|sibling| sibling.as_list())
        .collect()
}
