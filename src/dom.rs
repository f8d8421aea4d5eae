//! HTML utility functions for navigating and extracting data from DOM trees.
//!
//! Everything here operates on `scraper` element references and is shared by
//! the panel and content extractors.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::config::BLOCK_SEPARATOR;

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("valid selector"));

#[allow(clippy::expect_used)]
static DT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dt").expect("valid selector"));

#[allow(clippy::expect_used)]
static DD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dd").expect("valid selector"));

#[allow(clippy::expect_used)]
static LI: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").expect("valid selector"));

/// Closed classification of the element kinds the extractor dispatches on.
///
/// Anything outside the known set lands in `Other` and is handled by the
/// trimmed-text fallback rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    Heading,
    List,
    DefinitionList,
    Anchor,
    Container,
    Other,
}

impl NodeKind {
    /// Classify an element by tag name.
    #[must_use]
    pub fn of(el: ElementRef<'_>) -> Self {
        match el.value().name() {
            "p" => Self::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "ul" | "ol" => Self::List,
            "dl" => Self::DefinitionList,
            "a" => Self::Anchor,
            "div" => Self::Container,
            _ => Self::Other,
        }
    }
}

/// Collect all descendant text of an element, trimmed.
#[must_use]
pub fn collect_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Collect descendant text, skipping everything inside `<span>` elements.
///
/// The catalogue decorates contact entries (coordinators, lecturers) with
/// `<span>` obfuscated mail tokens; those must not leak into the extracted
/// names.
#[must_use]
pub fn text_without_spans(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_non_span(el, &mut out);
    out.trim().to_string()
}

fn collect_non_span(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name() != "span" {
                collect_non_span(child_el, out);
            }
        }
    }
}

/// Element children of a node (text nodes and comments skipped).
pub fn element_children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Direct text-node children of an element, trimmed, empties dropped.
///
/// Does not recurse: text belonging to child elements is not included.
#[must_use]
pub fn direct_texts(el: ElementRef<'_>) -> Vec<String> {
    el.children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// The next sibling that is an element.
#[must_use]
pub fn next_sibling_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Find a descendant element by its `id` attribute.
#[must_use]
pub fn find_by_id<'a>(scope: ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr("id") == Some(id))
}

/// Trimmed text of every `<li>` under a list element.
#[must_use]
pub fn list_item_texts(el: ElementRef<'_>) -> Vec<String> {
    el.select(&LI).map(collect_text).collect()
}

/// Paired `<dt>`/`<dd>` elements of a definition list, in document order.
///
/// Unpaired trailing entries are dropped, matching zip semantics.
#[must_use]
pub fn definition_pairs<'a>(dl: ElementRef<'a>) -> Vec<(ElementRef<'a>, ElementRef<'a>)> {
    dl.select(&DT).zip(dl.select(&DD)).collect()
}

/// Join the texts of a value cell's nested `<div>` blocks with the reserved
/// separator token; fall back to the cell's own trimmed text when the cell
/// has no nested blocks.
///
/// Stacked sub-entries (two schedule groups, exam plus re-exam) stay
/// distinguishable this way instead of collapsing into one run-on string.
#[must_use]
pub fn joined_blocks(el: ElementRef<'_>) -> String {
    let blocks: Vec<String> = el.select(&DIV).map(collect_text).collect();
    if blocks.is_empty() {
        collect_text(el)
    } else {
        blocks.join(BLOCK_SEPARATOR)
    }
}
