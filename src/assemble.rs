//! Record assembly: merge, key translation, faculty gate, normalization.
//!
//! Takes the raw panel and content extractions for one course page and
//! produces the final [`Outcome`]: either a normalized course record or a
//! rejection when the course belongs to a faculty outside the harvest
//! target.

use crate::config::TARGET_FACULTY;
use crate::error::{HarvestError, Result};
use crate::normalize::normalize_record;
use crate::record::{Outcome, Record, Value};
use crate::tables::{lookup_or_identity, FACULTY_TABLE, KEY_TABLE};

/// Assemble one course record from its page extractions.
///
/// The record starts with the page URL, then the panel fields, then the
/// content fields; on a key collision the content value overwrites the
/// panel value. Keys are then translated to canonical English, the
/// contracting faculty is resolved and checked against the harvest target,
/// and the normalization pipeline runs on records that pass the gate.
///
/// # Errors
/// Propagates faculty-resolution and normalization failures; a non-target
/// faculty is not an error but an [`Outcome::Rejected`].
pub fn assemble_record(url: &str, panel: Record, content: Record) -> Result<Outcome> {
    let mut record = Record::new();
    record.insert("url".to_string(), Value::text(url));
    for (key, value) in panel {
        record.insert(key, value);
    }
    for (key, value) in content {
        record.insert(key, value);
    }

    let record = translate_keys(record);
    let (record, faculty) = resolve_faculty(record)?;

    if faculty != TARGET_FACULTY {
        tracing::info!(faculty, "Course outside target faculty, rejecting");
        return Ok(Outcome::Rejected { faculty });
    }

    let record = normalize_record(record)?;
    Ok(Outcome::Course(record))
}

/// Translate every field name through the canonical key table.
///
/// Field order is preserved. When two source keys translate to the same
/// canonical name (the catalogue's singular and plural department labels
/// do), the later value wins but the key keeps its first position.
#[must_use]
pub fn translate_keys(record: Record) -> Record {
    let mut translated = Record::new();
    for (key, value) in record {
        let key = lookup_or_identity(KEY_TABLE, &key, "field names").to_string();
        translated.insert(key, value);
    }
    translated
}

/// Resolve the contracting faculty to its English name.
///
/// The panel extraction stores the faculty as a one-element list; its first
/// entry is translated when the name is known and passed through otherwise,
/// and the field is flattened to scalar text either way.
///
/// # Errors
/// `HarvestError::MissingField` when the record has no contracting faculty,
/// `HarvestError::UnexpectedShape` when the field is not a non-empty list
/// of text.
fn resolve_faculty(mut record: Record) -> Result<(Record, String)> {
    let faculty = {
        let value = record
            .get("contracting faculty")
            .ok_or_else(|| HarvestError::MissingField("contracting faculty".to_string()))?;
        let items = value.as_list().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "contracting faculty".to_string(),
            details: format!("expected list, found {}", value.shape_name()),
        })?;
        let first = items.first().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "contracting faculty".to_string(),
            details: "expected a non-empty list".to_string(),
        })?;
        let name = first.as_text().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "contracting faculty".to_string(),
            details: format!("expected text entry, found {}", first.shape_name()),
        })?;
        lookup_or_identity(FACULTY_TABLE, name, "faculties").to_string()
    };
    record.insert(
        "contracting faculty".to_string(),
        Value::text(faculty.clone()),
    );
    Ok((record, faculty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn science_panel() -> Record {
        let mut panel = Record::new();
        panel.insert("sprog".to_string(), Value::text("Dansk"));
        panel.insert("point".to_string(), Value::text("7,5 ECTS"));
        panel.insert(
            "udbydende fakultet".to_string(),
            Value::List(vec![Value::text("Det Natur- og Biovidenskabelige Fakultet")]),
        );
        panel
    }

    fn minimal_content() -> Record {
        let mut content = Record::new();
        content.insert(
            "primary title".to_string(),
            Value::text("NDAB24002U Algoritmer og Datastrukturer"),
        );
        content.insert(
            "Eksamen".to_string(),
            Value::List(vec![Value::text("Skriftlig prøve")]),
        );
        content
    }

    #[test]
    fn test_assemble_science_course() {
        let outcome = assemble_record(
            "https://kurser.ku.dk/course/ndab24002u",
            science_panel(),
            minimal_content(),
        )
        .expect("assembly succeeds");

        let record = outcome.record().expect("course kept");
        assert_eq!(
            record["url"],
            Value::text("https://kurser.ku.dk/course/ndab24002u")
        );
        assert_eq!(
            record["contracting faculty"],
            Value::text("Faculty of Science")
        );
        // Normalization ran: keys translated, credit coerced, language coded
        assert_eq!(record["credit"], Value::Number(7.5));
        assert_eq!(record["language"], Value::text("da"));
        assert_eq!(
            record["primary title"],
            Value::text("Algoritmer og Datastrukturer")
        );
        assert!(record.contains_key("Exam"));
        assert!(!record.contains_key("Eksamen"));
    }

    #[test]
    fn test_assemble_rejects_other_faculty() {
        let mut panel = science_panel();
        panel.insert(
            "udbydende fakultet".to_string(),
            Value::List(vec![Value::text("Det Juridiske Fakultet")]),
        );

        let outcome = assemble_record("https://kurser.ku.dk/course/x", panel, Record::new())
            .expect("assembly succeeds");

        assert_eq!(
            outcome,
            Outcome::Rejected {
                faculty: "Faculty of Law".to_string()
            }
        );
    }

    #[test]
    fn test_assemble_unknown_faculty_passes_through_and_rejects() {
        let mut panel = science_panel();
        panel.insert(
            "udbydende fakultet".to_string(),
            Value::List(vec![Value::text("Unknown Faculty")]),
        );

        let outcome = assemble_record("https://kurser.ku.dk/course/x", panel, Record::new())
            .expect("assembly succeeds");

        assert_eq!(
            outcome,
            Outcome::Rejected {
                faculty: "Unknown Faculty".to_string()
            }
        );
    }

    #[test]
    fn test_assemble_content_overwrites_panel() {
        let mut panel = science_panel();
        panel.insert("niveau".to_string(), Value::text("from panel"));
        let mut content = minimal_content();
        content.insert("niveau".to_string(), Value::text("from content"));

        let outcome = assemble_record("https://kurser.ku.dk/course/x", panel, content)
            .expect("assembly succeeds");

        let record = outcome.record().expect("course kept");
        assert_eq!(record["level"], Value::text("from content"));
    }

    #[test]
    fn test_assemble_missing_faculty_is_error() {
        let mut panel = science_panel();
        panel.shift_remove("udbydende fakultet");

        assert!(matches!(
            assemble_record("https://kurser.ku.dk/course/x", panel, minimal_content()),
            Err(HarvestError::MissingField(_))
        ));
    }

    #[test]
    fn test_assemble_scalar_faculty_is_shape_error() {
        let mut panel = science_panel();
        panel.insert(
            "udbydende fakultet".to_string(),
            Value::text("Det Juridiske Fakultet"),
        );

        assert!(matches!(
            assemble_record("https://kurser.ku.dk/course/x", panel, minimal_content()),
            Err(HarvestError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn test_translate_keys_preserves_order() {
        let mut record = Record::new();
        record.insert("sprog".to_string(), Value::text("Dansk"));
        record.insert("Kursusindhold".to_string(), Value::List(Vec::new()));
        record.insert("unknown".to_string(), Value::text("kept"));

        let translated = translate_keys(record);
        let keys: Vec<&str> = translated.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["language", "Content", "unknown"]);
    }

    #[test]
    fn test_translate_keys_collision_keeps_last_value() {
        // Singular and plural department labels both map to the same
        // canonical name; the later value wins.
        let mut record = Record::new();
        record.insert(
            "udbydende institut".to_string(),
            Value::text("Institut A"),
        );
        record.insert(
            "udbydende institutter".to_string(),
            Value::text("Institut A__DIV__Institut B"),
        );

        let translated = translate_keys(record);
        assert_eq!(translated.len(), 1);
        assert_eq!(
            translated["contracting departments"],
            Value::text("Institut A__DIV__Institut B")
        );
    }
}
