//! Core data types for harvested course records.
//!
//! A [`Record`] is an insertion-ordered map from field name to [`Value`].
//! Order matters in two places: exam disambiguation picks the last
//! exam-like key in record order, and key translation keeps the source
//! page's field order in the output.

use indexmap::IndexMap;
use serde::Serialize;

/// A harvested course record: field name to value, insertion-ordered.
pub type Record = IndexMap<String, Value>;

/// A field value in a course record.
///
/// Mirrors the shapes the extractor produces: scalar text, ordered lists,
/// and label-to-value mappings. `Number` only appears after normalization
/// (credit, workload hours). `Null` marks an optional field that was
/// looked for and not found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly absent optional field.
    Null,
    /// Scalar text.
    Text(String),
    /// Float value produced by normalization.
    Number(f64),
    /// Ordered list of nested values.
    List(Vec<Value>),
    /// Label-to-value mapping, insertion-ordered.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Build a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// View as text, if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View as a list slice, if this is a `List` value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// View as a map, if this is a `Map` value.
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// View as a float, if this is a `Number` value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is the `Null` value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value's shape, for error messages.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

/// Merge `extra` into `record`, keeping existing entries on key collision.
///
/// Used when combining the output of the two content-extraction strategies:
/// the earlier strategy's value wins.
pub fn merge_missing(record: &mut Record, extra: Record) {
    for (key, value) in extra {
        record.entry(key).or_insert(value);
    }
}

/// Result of harvesting one course page.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The course belongs to the target faculty; the normalized record.
    Course(Record),
    /// The course belongs to another faculty and was filtered out.
    Rejected {
        /// The resolved (translated when known) faculty name.
        faculty: String,
    },
}

impl Outcome {
    /// The record, if the course was kept.
    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Course(record) => Some(record),
            Self::Rejected { .. } => None,
        }
    }

    /// Whether the course was filtered out by the faculty allow-list.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::text("hi").as_text(), Some("hi"));
        assert_eq!(Value::Number(7.5).as_number(), Some(7.5));
        assert!(Value::Null.is_null());
        assert_eq!(Value::text("hi").as_list(), None);

        let list = Value::List(vec![Value::text("a")]);
        assert_eq!(list.as_list().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_value_shape_name() {
        assert_eq!(Value::Null.shape_name(), "null");
        assert_eq!(Value::text("x").shape_name(), "text");
        assert_eq!(Value::List(Vec::new()).shape_name(), "list");
        assert_eq!(Value::Map(IndexMap::new()).shape_name(), "map");
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut record = Record::new();
        record.insert("title".to_string(), Value::text("first"));

        let mut extra = Record::new();
        extra.insert("title".to_string(), Value::text("second"));
        extra.insert("level".to_string(), Value::text("Bachelor"));

        merge_missing(&mut record, extra);

        assert_eq!(record["title"], Value::text("first"));
        assert_eq!(record["level"], Value::text("Bachelor"));
    }

    #[test]
    fn test_merge_missing_preserves_order() {
        let mut record = Record::new();
        record.insert("a".to_string(), Value::text("1"));

        let mut extra = Record::new();
        extra.insert("b".to_string(), Value::text("2"));
        extra.insert("c".to_string(), Value::text("3"));

        merge_missing(&mut record, extra);

        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_outcome_accessors() {
        let mut record = Record::new();
        record.insert("credit".to_string(), Value::Number(7.5));
        let kept = Outcome::Course(record);
        assert!(!kept.is_rejected());
        assert!(kept.record().is_some());

        let rejected = Outcome::Rejected {
            faculty: "Faculty of Law".to_string(),
        };
        assert!(rejected.is_rejected());
        assert!(rejected.record().is_none());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let mut map = IndexMap::new();
        map.insert("Lectures".to_string(), Value::Number(36.0));
        let value = Value::Map(map);

        let yaml = serde_yaml_ng::to_string(&value).expect("serializable");
        assert!(yaml.contains("Lectures: 36.0"));
    }
}
