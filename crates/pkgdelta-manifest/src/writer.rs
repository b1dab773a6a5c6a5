use std::path::Path;

use serde_json::Value;

use crate::error::ManifestError;
use crate::reader::read_document;

/// What [`write_version`] did to a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    NotNeeded,
    NotFound,
}

/// Sets the `version` field of a `package.json`, keeping every other key in
/// its original order.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written.
pub fn write_version(path: &Path, version: &str) -> Result<WriteOutcome, ManifestError> {
    if !path.exists() {
        return Ok(WriteOutcome::NotFound);
    }

    let mut doc = read_document(path)?;
    if doc.get("version").and_then(Value::as_str) == Some(version) {
        return Ok(WriteOutcome::NotNeeded);
    }

    doc.insert("version".to_string(), Value::String(version.to_string()));

    let content = serde_json::to_string_pretty(&doc).map_err(|source| {
        ManifestError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;

    std::fs::write(path, content).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(WriteOutcome::Written)
}
