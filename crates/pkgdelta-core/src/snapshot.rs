use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PackageState;

/// Persisted state of one package.
/// Only `hash` is required on disk; older snapshots may omit the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_folder: Option<String>,
}

impl SnapshotEntry {
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            version: None,
            full_name: None,
            package_folder: None,
        }
    }
}

impl From<PackageState> for SnapshotEntry {
    fn from(state: PackageState) -> Self {
        Self {
            hash: state.hash,
            version: Some(state.version),
            full_name: state.full_name,
            package_folder: Some(state.package_folder),
        }
    }
}

/// Last recorded state of every package, keyed by package folder name.
/// File: `.cicd/hash.json`
/// Format:
/// ```json
/// { "pkg-a": { "hash": "..", "version": "1.0.0", "fullName": "@scope/pkg-a", "packageFolder": "packages" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    packages: BTreeMap<String, SnapshotEntry>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.packages.get(name)
    }

    pub fn insert(&mut self, name: String, entry: SnapshotEntry) {
        self.packages.insert(name, entry);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotEntry)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl FromIterator<(String, SnapshotEntry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SnapshotEntry)>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().collect(),
        }
    }
}
