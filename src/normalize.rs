//! Field normalization pipeline.
//!
//! An ordered sequence of pure record-in/record-out steps applied after
//! assembly. Order is significant: workload key translation assumes
//! dictification already ran, credit coercion assumes keys are already
//! canonical. Each step validates the shape it operates on and fails with
//! a typed error rather than silently corrupting the record.

use indexmap::IndexMap;

use crate::config::TITLE_PREFIX_LEN;
use crate::error::{HarvestError, Result};
use crate::record::{Record, Value};
use crate::tables::{lookup_or_identity, EXAM_KEY_TABLE, WORKLOAD_TABLE};

/// Normalize whitespace: newlines and non-breaking spaces become ordinary
/// spaces. No trimming beyond that.
#[must_use]
pub fn fix_string(s: &str) -> String {
    s.replace('\n', " ").replace('\u{a0}', " ")
}

/// Run the full normalization pipeline in its fixed order.
pub fn normalize_record(record: Record) -> Result<Record> {
    let record = disambiguate_exam(record)?;
    let record = translate_exam_subkeys(record)?;
    let record = dictify_workload(record)?;
    let record = translate_workload_keys(record)?;
    let record = fix_primary_title(record)?;
    let record = normalize_language(record)?;
    let record = tidy_content(record)?;
    floatify_credit(record)
}

/// Step 1: collapse all exam-like keys into a single canonical `Exam` key.
///
/// Course pages label the exam section in either language ("Exam...",
/// "Eksa..."); the last such key in record order wins and the rest are
/// discarded. Zero exam-like keys means extraction went wrong upstream,
/// which is a contract violation, not a tolerable gap.
pub fn disambiguate_exam(mut record: Record) -> Result<Record> {
    let exam_keys: Vec<String> = record
        .keys()
        .filter(|key| key.starts_with("Exam") || key.starts_with("Eksa"))
        .cloned()
        .collect();

    if exam_keys.is_empty() {
        return Err(HarvestError::NoExamSection);
    }

    let mut kept = Value::Null;
    for key in &exam_keys {
        if let Some(value) = record.shift_remove(key) {
            kept = value;
        }
    }
    record.insert("Exam".to_string(), kept);
    Ok(record)
}

/// Step 2: translate the exam table's labels to English.
///
/// Only applies when `Exam` is a mapping; the item-block extraction wraps
/// the table in a list, which passes through untouched.
pub fn translate_exam_subkeys(mut record: Record) -> Result<Record> {
    if let Some(Value::Map(table)) = record.get("Exam") {
        let translated: IndexMap<String, Value> = table
            .iter()
            .map(|(key, value)| {
                let key = lookup_or_identity(EXAM_KEY_TABLE, key, "exam keys");
                (key.to_string(), value.clone())
            })
            .collect();
        record.insert("Exam".to_string(), Value::Map(translated));
    }
    Ok(record)
}

/// Step 3: turn the raw workload list into a category-to-hours mapping.
///
/// The raw value is an ordered list whose first two entries are column
/// headers; the remainder alternates category, hours, category, hours.
/// Hours use comma as the decimal separator. The item-block extraction
/// wraps the list in a one-element list; both shapes are accepted.
pub fn dictify_workload(mut record: Record) -> Result<Record> {
    let entries: Vec<String> = {
        let Some(value) = record.get("Workload") else {
            return Ok(record);
        };
        let items = value.as_list().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "Workload".to_string(),
            details: format!("expected list, found {}", value.shape_name()),
        })?;
        let flat = match items.first() {
            Some(Value::List(inner)) => inner.as_slice(),
            _ => items,
        };
        flat.iter()
            .map(|item| {
                item.as_text()
                    .map(str::to_string)
                    .ok_or_else(|| HarvestError::UnexpectedShape {
                        field: "Workload".to_string(),
                        details: format!("expected text entry, found {}", item.shape_name()),
                    })
            })
            .collect::<Result<_>>()?
    };

    // First two entries are the header labels.
    let rows = entries.get(2..).unwrap_or_default();
    if rows.len() % 2 != 0 {
        return Err(HarvestError::UnpairedCourseLoad(rows.len()));
    }

    let mut table = IndexMap::new();
    for pair in rows.chunks(2) {
        let hours: f64 = pair[1].trim().replace(',', ".").parse().map_err(|_| {
            HarvestError::NumberParse {
                field: format!("Workload '{}'", pair[0]),
                value: pair[1].clone(),
            }
        })?;
        table.insert(pair[0].clone(), Value::Number(hours));
    }
    record.insert("Workload".to_string(), Value::Map(table));
    Ok(record)
}

/// Step 4: translate workload category names to English.
pub fn translate_workload_keys(mut record: Record) -> Result<Record> {
    let translated = {
        let Some(value) = record.get("Workload") else {
            return Ok(record);
        };
        let table = value.as_map().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "Workload".to_string(),
            details: format!("expected map, found {}", value.shape_name()),
        })?;
        table
            .iter()
            .map(|(key, value)| {
                let key = lookup_or_identity(WORKLOAD_TABLE, key, "workload");
                (key.to_string(), value.clone())
            })
            .collect::<IndexMap<String, Value>>()
    };
    record.insert("Workload".to_string(), Value::Map(translated));
    Ok(record)
}

/// Step 5: strip the course-code prefix from the page title and normalize
/// its whitespace. The title is a required field; its absence means
/// extraction failed upstream.
pub fn fix_primary_title(mut record: Record) -> Result<Record> {
    let cleaned = {
        let value = record
            .get("primary title")
            .ok_or_else(|| HarvestError::MissingField("primary title".to_string()))?;
        let title = value.as_text().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "primary title".to_string(),
            details: format!("expected text, found {}", value.shape_name()),
        })?;
        let stripped: String = title.chars().skip(TITLE_PREFIX_LEN).collect();
        fix_string(&stripped)
    };
    record.insert("primary title".to_string(), Value::Text(cleaned));
    Ok(record)
}

/// Step 6: collapse language descriptions to "da"/"en" codes.
///
/// Any value starting with the Danish stem maps to "da", the English stem
/// to "en". Other languages pass through unchanged; the catalogue does not
/// currently teach in anything else.
pub fn normalize_language(mut record: Record) -> Result<Record> {
    let code = {
        let Some(value) = record.get("language") else {
            return Ok(record);
        };
        let language = value.as_text().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "language".to_string(),
            details: format!("expected text, found {}", value.shape_name()),
        })?;
        let lowered = language.to_lowercase();
        if lowered.starts_with("da") {
            Some("da")
        } else if lowered.starts_with("en") {
            Some("en")
        } else {
            tracing::debug!(language, "Unmapped language value passed through");
            None
        }
    };
    if let Some(code) = code {
        record.insert("language".to_string(), Value::text(code));
    }
    Ok(record)
}

/// Step 7: scrub the free-text section lists.
///
/// Removes null and empty-string entries at every nesting depth and
/// normalizes whitespace in the remaining string leaves. A leaf of any
/// other shape is logged and left unchanged.
pub fn tidy_content(mut record: Record) -> Result<Record> {
    for field in ["Content", "Learning Outcome"] {
        let cleaned = {
            let Some(value) = record.get(field) else {
                continue;
            };
            let items = value.as_list().ok_or_else(|| HarvestError::UnexpectedShape {
                field: field.to_string(),
                details: format!("expected list, found {}", value.shape_name()),
            })?;
            clean_entries(items.to_vec(), field)
        };
        record.insert(field.to_string(), Value::List(cleaned));
    }
    Ok(record)
}

fn clean_entries(items: Vec<Value>, field: &str) -> Vec<Value> {
    let mut cleaned = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => {}
            Value::Text(text) if text.is_empty() => {}
            Value::Text(text) => cleaned.push(Value::Text(fix_string(&text))),
            Value::List(inner) => cleaned.push(Value::List(clean_entries(inner, field))),
            other => {
                tracing::warn!(
                    field,
                    shape = other.shape_name(),
                    "Unexpected section entry shape left unchanged"
                );
                cleaned.push(other);
            }
        }
    }
    cleaned
}

/// Step 8: coerce the credit field to a float ECTS count.
///
/// Accepts either decimal separator and an optional " ects" unit suffix.
/// Malformed input here is fatal for the record.
pub fn floatify_credit(mut record: Record) -> Result<Record> {
    let credit = {
        let Some(value) = record.get("credit") else {
            return Ok(record);
        };
        let text = value.as_text().ok_or_else(|| HarvestError::UnexpectedShape {
            field: "credit".to_string(),
            details: format!("expected text, found {}", value.shape_name()),
        })?;
        let original = text.to_string();
        let cleaned = fix_string(&text.to_lowercase())
            .replace(',', ".")
            .replace(" ects", "");
        cleaned
            .trim()
            .parse::<f64>()
            .map_err(|_| HarvestError::NumberParse {
                field: "credit".to_string(),
                value: original,
            })?
    };
    record.insert("credit".to_string(), Value::Number(credit));
    Ok(record)
}
