//! Error types for the harvester.
//!
//! One crate-level error enum with a `Result` alias. Structural problems
//! (missing panel, missing marker) and data-contract problems (no exam
//! section, unpaired course-load list) get their own variants so callers
//! can tell a broken page apart from a broken assumption.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Invalid course code format.
    #[error("Invalid course code: '{0}'. Expected four letters, five digits and a suffix letter (e.g., NDAB24002U)")]
    InvalidCourseCode(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a course page.
    #[error("Failed to download course page for {course_code}: {source}")]
    PageDownload {
        course_code: String,
        #[source]
        source: reqwest::Error,
    },

    /// All download retries failed.
    #[error("All {attempts} download attempts failed: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// A required substructure is absent from the document.
    #[error("Missing required element: {element} in {context}")]
    MissingStructure { element: String, context: String },

    /// A required record field is absent after extraction.
    #[error("Missing required field '{0}' in course record")]
    MissingField(String),

    /// No exam-like section was extracted; every valid course page has one.
    #[error("No exam-like section found in course record")]
    NoExamSection,

    /// Course-load list does not pair up into name/value entries.
    #[error("Course load list has odd length ({0}); expected alternating name/value pairs")]
    UnpairedCourseLoad(usize),

    /// A field holds a value shape the pipeline cannot process.
    #[error("Field '{field}' has unexpected shape: {details}")]
    UnexpectedShape { field: String, details: String },

    /// Numeric coercion failed; fatal for the record.
    #[error("Failed to parse {field} value '{value}' as a number")]
    NumberParse { field: String, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl HarvestError {
    /// Build a [`HarvestError::MissingStructure`] from string-ish parts.
    pub fn missing(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingStructure {
            element: element.into(),
            context: context.into(),
        }
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
