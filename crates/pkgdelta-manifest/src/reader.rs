use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ManifestError;

/// The fields of a `package.json` that change detection cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read,
/// `ManifestError::Parse` if the JSON is malformed, or
/// `ManifestError::NotAnObject` if the top-level value is not an object.
pub fn read_document(path: &Path) -> Result<Map<String, Value>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ManifestError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads the manifest at `path`, returning `None` when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_manifest(path: &Path) -> Result<Option<PackageManifest>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }

    let document = read_document(path)?;
    serde_json::from_value(Value::Object(document))
        .map(Some)
        .map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
