//! Content-container location and description extraction.
//!
//! The course description lives in a `main-content` container. Two page
//! generations exist in the catalogue:
//!
//! - **Labeled fields**: fixed sections carry stable id markers
//!   (`course-content`, `course-exams1`, `course-load`, ...).
//! - **Item blocks**: every section is a self-contained `course-item`
//!   block whose anchor text names the section.
//!
//! Both strategies run when their markers are present; their partial
//! records merge with earlier-strategy-wins precedence.

use std::sync::LazyLock;

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};

use crate::dom::{
    collect_text, definition_pairs, direct_texts, element_children, find_by_id, joined_blocks,
    list_item_texts, NodeKind,
};
use crate::error::{HarvestError, Result};
use crate::record::{merge_missing, Record, Value};

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static MAIN_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class*="main-content"]"#).expect("valid selector"));

#[allow(clippy::expect_used)]
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));

#[allow(clippy::expect_used)]
static COURSE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.course-item").expect("valid selector"));

#[allow(clippy::expect_used)]
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

#[allow(clippy::expect_used)]
static DIV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("valid selector"));

#[allow(clippy::expect_used)]
static DL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl").expect("valid selector"));

/// Locate the content container within a course page.
///
/// Matches any `div` whose class attribute contains the `main-content`
/// token. When the page carries more than one match the first is taken;
/// this is a documented permissive policy, not an error.
///
/// # Errors
/// `HarvestError::MissingStructure` when no container matches.
pub fn locate_content(doc: &Html) -> Result<ElementRef<'_>> {
    doc.select(&MAIN_CONTENT)
        .next()
        .ok_or_else(|| HarvestError::missing("div[class*=main-content]", "course page"))
}

/// Extract the course description sections into a record.
///
/// The `h1` page title is always required. Each extraction strategy runs
/// when its markers are present on the page; at least one must apply.
/// Results merge with earlier-strategy-wins precedence, so the labeled
/// fields are never clobbered by an identically-named item block.
///
/// # Errors
/// - `HarvestError::MissingStructure` when the title is absent, a required
///   labeled field is absent, or neither strategy applies
/// - `HarvestError::UnpairedCourseLoad` for an odd-length course-load list
pub fn extract_content(content: ElementRef<'_>) -> Result<Record> {
    let mut record = Record::new();

    let title = content
        .select(&TITLE)
        .next()
        .ok_or_else(|| HarvestError::missing("h1", "content container"))?;
    record.insert("primary title".to_string(), Value::text(collect_text(title)));

    let mut applied = false;

    if find_by_id(content, "course-content").is_some() {
        applied = true;
        merge_missing(&mut record, extract_labeled_fields(content)?);
    }

    if content.select(&COURSE_ITEM).next().is_some() {
        applied = true;
        merge_missing(&mut record, extract_course_items(content)?);
    }

    if !applied {
        return Err(HarvestError::missing(
            "course-content marker or course-item blocks",
            "content container",
        ));
    }

    Ok(record)
}

/// Labeled-field strategy: fixed sections located by id markers.
fn extract_labeled_fields(content: ElementRef<'_>) -> Result<Record> {
    let mut record = Record::new();

    // Optional: only courses taught in English carry a translated title.
    let english_title = find_by_id(content, "course-language")
        .map(|el| Value::text(collect_text(el)))
        .unwrap_or(Value::Null);
    record.insert("english title".to_string(), english_title);

    let course_content = find_by_id(content, "course-content")
        .ok_or_else(|| HarvestError::missing("#course-content", "content container"))?;
    record.insert(
        "course content".to_string(),
        Value::text(collect_text(course_content)),
    );

    // Two alternate markers exist across page vintages; try both.
    let prerequisites = find_by_id(content, "course-skills")
        .or_else(|| find_by_id(content, "course-prerequisites"))
        .map(|el| Value::text(collect_text(el)))
        .unwrap_or(Value::Null);
    record.insert("recommended prerequisites".to_string(), prerequisites);

    record.insert("exams".to_string(), extract_exam_table(content)?);
    record.insert("course load".to_string(), extract_course_load(content)?);

    Ok(record)
}

/// The exam definition list under the `course-exams1` marker.
fn extract_exam_table(content: ElementRef<'_>) -> Result<Value> {
    let exams = find_by_id(content, "course-exams1")
        .ok_or_else(|| HarvestError::missing("#course-exams1", "content container"))?;
    let dl = exams
        .select(&DL)
        .next()
        .ok_or_else(|| HarvestError::missing("dl", "#course-exams1"))?;

    let mut table = IndexMap::new();
    for (dt, dd) in definition_pairs(dl) {
        table.insert(collect_text(dt), Value::text(collect_text(dd)));
    }
    Ok(Value::Map(table))
}

/// The interleaved category/hours list under the `course-load` marker.
///
/// List items pair up two at a time (item 0 = category, item 1 = hours).
/// An odd-length list means the page shape changed and is rejected rather
/// than silently dropping the trailing item.
fn extract_course_load(content: ElementRef<'_>) -> Result<Value> {
    let load = find_by_id(content, "course-load")
        .ok_or_else(|| HarvestError::missing("#course-load", "content container"))?;

    let items = list_item_texts(load);
    if items.len() % 2 != 0 {
        return Err(HarvestError::UnpairedCourseLoad(items.len()));
    }

    let mut table = IndexMap::new();
    for pair in items.chunks(2) {
        table.insert(pair[0].clone(), Value::text(pair[1].clone()));
    }
    Ok(Value::Map(table))
}

/// Item-list strategy: every `course-item` block becomes one section.
fn extract_course_items(content: ElementRef<'_>) -> Result<Record> {
    let mut record = Record::new();

    for block in content.select(&COURSE_ITEM) {
        let anchor = block
            .select(&ANCHOR)
            .next()
            .ok_or_else(|| HarvestError::missing("a", "course-item block"))?;
        let label = collect_text(anchor);

        let body = block
            .select(&DIV)
            .next()
            .ok_or_else(|| HarvestError::missing("div", "course-item block"))?;

        let mut values: Vec<Value> = element_children(body).map(convert_section_child).collect();

        // Text hanging directly in the block body, outside any child
        // element, still belongs to the section. The single leading space
        // preserves the legacy textual-diff marker for these entries.
        for text in direct_texts(body) {
            values.push(Value::text(format!(" {text}")));
        }

        // A repeated anchor label replaces the earlier block's value.
        record.insert(label, Value::List(values));
    }

    Ok(record)
}

/// Convert one child of a section body per its node kind.
fn convert_section_child(el: ElementRef<'_>) -> Value {
    match NodeKind::of(el) {
        NodeKind::List => Value::List(
            list_item_texts(el)
                .into_iter()
                .map(Value::text)
                .collect(),
        ),
        NodeKind::DefinitionList => {
            let mut table = IndexMap::new();
            for (dt, dd) in definition_pairs(el) {
                table.insert(collect_text(dt), Value::text(joined_blocks(dd)));
            }
            Value::Map(table)
        }
        // Paragraphs, headings, anchors, containers and anything
        // unrecognized all reduce to their trimmed text.
        NodeKind::Paragraph
        | NodeKind::Heading
        | NodeKind::Anchor
        | NodeKind::Container
        | NodeKind::Other => Value::text(collect_text(el)),
    }
}
