//! Info-panel location and extraction.
//!
//! The course page carries several `panel-body` containers with identical
//! markup; only one holds the course metadata. This module finds it, then
//! converts its definition-list ("top") and heading/sibling ("bottom")
//! sections into record fields:
//!
//! - study board
//! - contracting departments
//! - contracting faculty
//! - course coordinators / lecturers
//! - schedule, credit, language, duration and the other top pairs

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::dom::{
    collect_text, definition_pairs, joined_blocks, next_sibling_element, text_without_spans,
    NodeKind,
};
use crate::error::{HarvestError, Result};
use crate::record::{Record, Value};

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static PANEL_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.panel-body").expect("valid selector"));

#[allow(clippy::expect_used)]
static SUB_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h5").expect("valid selector"));

#[allow(clippy::expect_used)]
static DL_HORIZONTAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl.dl-horizontal").expect("valid selector"));

#[allow(clippy::expect_used)]
static LAST_MODIFIED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.last-modified").expect("valid selector"));

#[allow(clippy::expect_used)]
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid selector"));

/// Locate the info panel within a course page.
///
/// Among all `panel-body` candidates, the real info panel is the one densest
/// in `h5` sub-headings; decoy containers share the class but carry few or
/// none. On a tied score the first-encountered candidate wins, keeping the
/// choice deterministic.
///
/// # Errors
/// `HarvestError::MissingStructure` when the page has no `panel-body` at all.
pub fn locate_panel(doc: &Html) -> Result<ElementRef<'_>> {
    let mut best: Option<(usize, ElementRef<'_>)> = None;

    for candidate in doc.select(&PANEL_BODY) {
        let score = candidate.select(&SUB_HEADING).count();
        let improves = match best {
            None => true,
            Some((best_score, _)) => score > best_score,
        };
        if improves {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, panel)| panel)
        .ok_or_else(|| HarvestError::missing("div.panel-body", "course page"))
}

/// Extract all panel sections into a record with lowercased keys.
///
/// Top sections come from the horizontal definition list: each `dt`/`dd`
/// pair becomes one scalar entry, with stacked `div` sub-entries in a value
/// cell joined by the reserved separator. Bottom sections pair each `h5`
/// heading with its following sibling and always produce list values, with
/// contact-link `<span>` decorations stripped from item texts.
///
/// # Errors
/// `HarvestError::MissingStructure` when the definition list, a heading's
/// content sibling, or the last-modified marker is absent.
pub fn extract_panel(panel: ElementRef<'_>) -> Result<Record> {
    let mut record = Record::new();

    let dl = panel
        .select(&DL_HORIZONTAL)
        .next()
        .ok_or_else(|| HarvestError::missing("dl.dl-horizontal", "panel body"))?;
    for (dt, dd) in definition_pairs(dl) {
        record.insert(collect_text(dt), Value::text(joined_blocks(dd)));
    }

    for heading in panel.select(&SUB_HEADING) {
        let label = collect_text(heading);
        let sibling = next_sibling_element(heading).ok_or_else(|| {
            HarvestError::missing(format!("content sibling of '{label}'"), "panel body")
        })?;

        let items = if NodeKind::of(sibling) == NodeKind::List {
            sibling
                .select(&LIST_ITEM)
                .map(|item| Value::text(text_without_spans(item)))
                .collect()
        } else {
            vec![Value::text(text_without_spans(sibling))]
        };
        record.insert(label, Value::List(items));
    }

    let last_modified = panel
        .select(&LAST_MODIFIED)
        .next()
        .ok_or_else(|| HarvestError::missing("div.last-modified", "panel body"))?;
    record.insert(
        "last-modified".to_string(),
        Value::text(collect_text(last_modified)),
    );

    Ok(record
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect())
}

/// Decode an obfuscated contact tag from a coordinator entry.
///
/// The catalogue encodes mail handles as `prefix-hexpayload`, each byte
/// shifted by `payload_len / 2 % 4 + 2`. Returns `None` when the token has
/// no payload or the payload is not valid hex.
#[must_use]
pub fn deobfuscate(token: &str) -> Option<String> {
    let payload = token.split('-').nth(1)?;
    let shift = (payload.len() / 2) % 4 + 2;

    let mut decoded = String::new();
    for chunk in payload.as_bytes().chunks(2) {
        let hex = std::str::from_utf8(chunk).ok()?;
        let value = u32::from_str_radix(hex, 16).ok()?;
        decoded.push(char::from_u32(value.checked_sub(shift as u32)?)?);
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PANEL_PAGE: &str = r#"<html><body>
        <div class="panel-body"><p>decoy navigation</p></div>
        <div class="panel-body">
            <dl class="dl-horizontal">
                <dt>Sprog</dt><dd>Dansk</dd>
                <dt>Point</dt><dd>7,5 ECTS</dd>
                <dt>Skemagruppe</dt>
                <dd><div>A (tirs 8-12)</div><div>B (tors 8-12)</div></dd>
            </dl>
            <h5>Studienævn</h5>
            <div>Studienævn for Datalogi</div>
            <h5>Kursusansvarlige</h5>
            <ul><li><span>mail-666768</span>Grete Hansen</li><li>Jens Jensen</li></ul>
            <div class="last-modified">14. september 2025</div>
        </div>
    </body></html>"#;

    #[test]
    fn test_locate_panel_picks_densest_in_headings() {
        let doc = Html::parse_document(PANEL_PAGE);
        let panel = locate_panel(&doc).expect("panel found");
        assert_eq!(panel.select(&SUB_HEADING).count(), 2);
    }

    #[test]
    fn test_locate_panel_missing() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(matches!(
            locate_panel(&doc),
            Err(HarvestError::MissingStructure { .. })
        ));
    }

    #[test]
    fn test_locate_panel_tie_break_first_wins() {
        // Two candidates with the same heading count: first one is chosen.
        let html = r#"<html><body>
            <div class="panel-body" id="first"><h5>A</h5><p>x</p></div>
            <div class="panel-body" id="second"><h5>B</h5><p>y</p></div>
        </body></html>"#;
        let doc = Html::parse_document(html);
        let panel = locate_panel(&doc).expect("panel found");
        assert_eq!(panel.value().attr("id"), Some("first"));
    }

    #[test]
    fn test_extract_panel_top_pairs() {
        let doc = Html::parse_document(PANEL_PAGE);
        let panel = locate_panel(&doc).expect("panel found");
        let record = extract_panel(panel).expect("extraction succeeds");

        assert_eq!(record["sprog"], Value::text("Dansk"));
        assert_eq!(record["point"], Value::text("7,5 ECTS"));
    }

    #[test]
    fn test_extract_panel_joins_nested_blocks() {
        let doc = Html::parse_document(PANEL_PAGE);
        let panel = locate_panel(&doc).expect("panel found");
        let record = extract_panel(panel).expect("extraction succeeds");

        assert_eq!(
            record["skemagruppe"],
            Value::text("A (tirs 8-12)__DIV__B (tors 8-12)")
        );
    }

    #[test]
    fn test_extract_panel_bottom_sections() {
        let doc = Html::parse_document(PANEL_PAGE);
        let panel = locate_panel(&doc).expect("panel found");
        let record = extract_panel(panel).expect("extraction succeeds");

        // Non-list sibling becomes a one-element list
        assert_eq!(
            record["studienævn"],
            Value::List(vec![Value::text("Studienævn for Datalogi")])
        );

        // List sibling becomes one entry per item, spans stripped
        assert_eq!(
            record["kursusansvarlige"],
            Value::List(vec![Value::text("Grete Hansen"), Value::text("Jens Jensen")])
        );
    }

    #[test]
    fn test_extract_panel_last_modified_and_lowercasing() {
        let doc = Html::parse_document(PANEL_PAGE);
        let panel = locate_panel(&doc).expect("panel found");
        let record = extract_panel(panel).expect("extraction succeeds");

        assert_eq!(record["last-modified"], Value::text("14. september 2025"));
        assert!(record.keys().all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn test_extract_panel_requires_definition_list() {
        let html = r#"<html><body><div class="panel-body"><h5>A</h5><p>x</p>
            <div class="last-modified">today</div></div></body></html>"#;
        let doc = Html::parse_document(html);
        let panel = locate_panel(&doc).expect("panel found");
        assert!(matches!(
            extract_panel(panel),
            Err(HarvestError::MissingStructure { .. })
        ));
    }

    #[test]
    fn test_deobfuscate_round_trip() {
        // "abc" shifted by (6 / 2) % 4 + 2 = 5: 0x66, 0x67, 0x68
        assert_eq!(deobfuscate("mail-666768"), Some("abc".to_string()));
    }

    #[test]
    fn test_deobfuscate_no_payload() {
        assert_eq!(deobfuscate("plainname"), None);
    }

    #[test]
    fn test_deobfuscate_invalid_hex() {
        assert_eq!(deobfuscate("mail-zz"), None);
    }
}
