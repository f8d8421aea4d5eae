//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvestError, Result};

/// Base URL of the University of Copenhagen course catalogue.
pub const CATALOGUE_BASE_URL: &str = "https://kurser.ku.dk";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// The only faculty whose courses are kept; everything else is rejected.
///
/// This is a domain allow-list, not a structural constraint: pages from
/// other faculties parse fine and are filtered during assembly.
pub const TARGET_FACULTY: &str = "Faculty of Science";

/// Separator joining nested block texts inside a single definition value.
///
/// A `<dd>` cell can stack several `<div>` sub-entries (e.g., two schedule
/// groups, two exam variants). Joining with this reserved token keeps the
/// sub-entries distinguishable downstream instead of silently merging them.
pub const BLOCK_SEPARATOR: &str = "__DIV__";

/// Number of characters the course code label occupies at the start of a
/// page title (`"NDAB24002U "` = 10 code characters + 1 space).
pub const TITLE_PREFIX_LEN: usize = 11;

/// Course code pattern: four letters, five digits, one suffix letter.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COURSE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{4}\d{5}[A-Za-z]$").expect("valid regex"));

/// Validate course code format.
///
/// # Arguments
/// * `course_code` - The catalogue course code to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(HarvestError::InvalidCourseCode)` if invalid
///
/// # Examples
/// ```
/// use kucourse_harvester::config::validate_course_code;
///
/// assert!(validate_course_code("NDAB24002U").is_ok());
/// assert!(validate_course_code("INVALID").is_err());
/// ```
pub fn validate_course_code(course_code: &str) -> Result<()> {
    if COURSE_CODE_PATTERN.is_match(course_code) {
        Ok(())
    } else {
        Err(HarvestError::InvalidCourseCode(course_code.to_string()))
    }
}

/// Build the catalogue URL for a course.
///
/// # Arguments
/// * `course_code` - Course code (should be validated with
///   `validate_course_code` first)
///
/// # Panics
/// Debug builds panic if `course_code` doesn't match the expected format.
pub fn course_url(course_code: &str) -> String {
    debug_assert!(
        COURSE_CODE_PATTERN.is_match(course_code),
        "course_code should be validated before calling course_url"
    );
    format!("{CATALOGUE_BASE_URL}/course/{course_code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_course_code_valid() {
        assert!(validate_course_code("NDAB24002U").is_ok());
        assert!(validate_course_code("NDAA04010U").is_ok());
        assert!(validate_course_code("ndab24002u").is_ok()); // Catalogue accepts lowercase
    }

    #[test]
    fn test_validate_course_code_invalid() {
        assert!(validate_course_code("").is_err());
        assert!(validate_course_code("NDAB2400U").is_err()); // 4 digits
        assert!(validate_course_code("NDAB240022U").is_err()); // 6 digits
        assert!(validate_course_code("NDAB24002").is_err()); // Missing suffix
        assert!(validate_course_code("1DAB24002U").is_err()); // Digit in prefix
    }

    #[test]
    fn test_course_url() {
        assert_eq!(
            course_url("NDAB24002U"),
            "https://kurser.ku.dk/course/NDAB24002U"
        );
    }
}
