//! KU Course Harvester - Download course descriptions from the University
//! of Copenhagen catalogue.
//!
//! This crate provides functionality to download course pages from the
//! kurser.ku.dk catalogue, extract their semi-structured descriptions and
//! convert them to normalized YAML records.
//!
//! # Example
//!
//! ```
//! use kucourse_harvester::config;
//!
//! // Validate a course code
//! assert!(config::validate_course_code("NDAB24002U").is_ok());
//! assert!(config::validate_course_code("INVALID").is_err());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`record`]: Core data types (Record, Value, Outcome)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading from the catalogue
//! - [`page`]: Course page downloading
//! - [`dom`]: HTML navigation utilities
//! - [`panel`]: Info-panel location and extraction
//! - [`content`]: Content-container location and extraction
//! - [`tables`]: Translation tables for catalogue vocabulary
//! - [`assemble`]: Record assembly, key translation and faculty gate
//! - [`normalize`]: Field normalization pipeline
//! - [`yaml`]: YAML output generation
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod assemble;
pub mod cli;
pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod harvester;
pub mod http;
pub mod normalize;
pub mod page;
pub mod panel;
pub mod record;
pub mod tables;
pub mod yaml;

// Re-export main functions
pub use harvester::{harvest_course, process_document};

// Re-export commonly used items
pub use config::validate_course_code;
pub use error::{HarvestError, Result};
pub use record::{Outcome, Record, Value};
