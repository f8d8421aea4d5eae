//! YAML serialization and persistence for harvested records.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::record::Record;

/// Serialize a record to a YAML document string.
///
/// Field order follows record order, so the output mirrors the source
/// page's layout.
///
/// # Errors
/// `HarvestError::Yaml` when a value cannot be represented.
pub fn to_yaml_string(record: &Record) -> Result<String> {
    Ok(serde_yaml_ng::to_string(record)?)
}

/// Write a record to `path` as a YAML document.
///
/// # Errors
/// `HarvestError::Yaml` on serialization failure, `HarvestError::Io` when
/// the file cannot be written.
pub fn save_record(record: &Record, path: &Path) -> Result<()> {
    let yaml = to_yaml_string(record)?;
    fs::write(path, yaml)?;
    tracing::debug!(path = %path.display(), "Record written");
    Ok(())
}
