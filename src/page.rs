//! Course page downloading.
//!
//! Thin wrapper over the HTTP layer that attaches course context to
//! transport failures.

use reqwest::blocking::Client;

use crate::config::course_url;
use crate::error::{HarvestError, Result};
use crate::http::{bytes_to_string, download_bytes};

/// Download the HTML page for a course.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `course_code` - The catalogue course code (e.g., "NDAB24002U")
///
/// # Returns
/// Raw HTML content as a string
pub fn download_course_page(client: &Client, course_code: &str) -> Result<String> {
    let url = course_url(course_code);
    let bytes = download_bytes(client, &url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::PageDownload {
                course_code: course_code.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(
        &bytes,
        &format!("course page for {course_code}"),
    ))
}

#[cfg(test)]
mod tests {
    // Network behavior is exercised via the retry logic tests in `http`;
    // the full extraction path is covered by tests/integration_test.rs
    // against local fixtures.
}
