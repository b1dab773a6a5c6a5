use std::collections::BTreeMap;

use pkgdelta_core::{DEFAULT_VERSION, PackageState};
use pkgdelta_hash::{EntryKind, ExclusionRules, FolderHash, hash_folder};
use tracing::debug;

use crate::error::OperationError;
use crate::traits::ManifestReader;
use crate::{Result, RunConfig};

/// Folder names inside a scan root that never denote a package.
pub const RESERVED_NAMES: &[&str] = &["version"];

/// Folders starting with this marker are private to the scan root.
pub const EXCLUDED_PREFIX: char = '_';

/// Current state of every package in one scan root, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRoot {
    pub package_folder: String,
    pub packages: BTreeMap<String, PackageState>,
}

impl ScannedRoot {
    #[must_use]
    pub fn new(package_folder: impl Into<String>) -> Self {
        Self {
            package_folder: package_folder.into(),
            packages: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>, state: PackageState) -> Self {
        self.packages.insert(name.into(), state);
        self
    }
}

#[must_use]
pub fn is_candidate_name(name: &str) -> bool {
    !name.starts_with(EXCLUDED_PREFIX) && !RESERVED_NAMES.contains(&name)
}

/// Hashes `package_folder` and reads the manifest of every package in it.
///
/// Hashing runs on the blocking pool; this future yields until it finishes.
///
/// # Errors
///
/// Returns an error if the scan root cannot be hashed or a manifest exists
/// but cannot be read.
pub async fn scan_root<M>(
    config: &RunConfig,
    rules: &ExclusionRules,
    package_folder: &str,
    manifests: &M,
) -> Result<ScannedRoot>
where
    M: ManifestReader,
{
    let root_path = config.scan_root_path(package_folder);
    let task_rules = rules.clone();
    let folder_hash = tokio::task::spawn_blocking(move || hash_folder(&root_path, &task_rules))
        .await
        .map_err(|source| OperationError::ScanTask {
            package_folder: package_folder.to_string(),
            source,
        })??;

    collect_packages(config, package_folder, &folder_hash, manifests)
}

fn collect_packages<M>(
    config: &RunConfig,
    package_folder: &str,
    folder_hash: &FolderHash,
    manifests: &M,
) -> Result<ScannedRoot>
where
    M: ManifestReader,
{
    let mut scanned = ScannedRoot::new(package_folder);

    for child in &folder_hash.children {
        if !is_candidate_name(&child.name) || child.kind == EntryKind::File {
            continue;
        }
        if !config.package_path(package_folder, &child.name).exists() {
            debug!(package_folder, name = %child.name, "package vanished after hashing");
            continue;
        }

        let manifest_path = config.manifest_path(package_folder, &child.name);
        let mut state = PackageState::new(child.hash.clone(), package_folder);
        if let Some(manifest) = manifests.read_manifest(&manifest_path)? {
            state.version = manifest.version.unwrap_or_else(|| DEFAULT_VERSION.to_string());
            state.full_name = manifest.name;
        }

        scanned.packages.insert(child.name.clone(), state);
    }

    Ok(scanned)
}
