//! Top-level harvest orchestration.
//!
//! Ties the pipeline together: validate the course code, download the page,
//! locate and extract the info panel and the content container, then
//! assemble and normalize the record.

use reqwest::blocking::Client;
use scraper::Html;

use crate::assemble::assemble_record;
use crate::config::{course_url, validate_course_code};
use crate::content::{extract_content, locate_content};
use crate::error::Result;
use crate::http::create_client;
use crate::page::download_course_page;
use crate::panel::{extract_panel, locate_panel};
use crate::record::Outcome;

/// Harvest a single course by code, creating a fresh HTTP client.
///
/// # Arguments
/// * `course_code` - The catalogue course code (e.g., "NDAB24002U")
///
/// # Errors
/// Validation, download, extraction and normalization failures all
/// propagate; a course outside the target faculty is an
/// [`Outcome::Rejected`], not an error.
pub fn harvest_course(course_code: &str) -> Result<Outcome> {
    let client = create_client()?;
    harvest_course_with_client(&client, course_code)
}

/// Harvest a single course using an existing HTTP client.
///
/// Use this when harvesting several courses so connection pooling is
/// shared across downloads.
///
/// # Errors
/// Same as [`harvest_course`].
pub fn harvest_course_with_client(client: &Client, course_code: &str) -> Result<Outcome> {
    validate_course_code(course_code)?;

    tracing::info!(course_code, "Harvesting course");
    let html = download_course_page(client, course_code)?;

    process_document(&course_url(course_code), &html)
}

/// Run the extraction pipeline on an already-downloaded page.
///
/// Split out from the network path so the whole pipeline can run against
/// local documents.
///
/// # Arguments
/// * `url` - The page URL, stored in the record
/// * `html` - The page HTML
///
/// # Errors
/// Extraction and normalization failures propagate.
pub fn process_document(url: &str, html: &str) -> Result<Outcome> {
    let doc = Html::parse_document(html);

    let panel = extract_panel(locate_panel(&doc)?)?;
    tracing::debug!(fields = panel.len(), "Panel extracted");

    let content = extract_content(locate_content(&doc)?)?;
    tracing::debug!(fields = content.len(), "Content extracted");

    assemble_record(url, panel, content)
}
