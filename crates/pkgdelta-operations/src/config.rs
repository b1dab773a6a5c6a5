use std::path::PathBuf;

use pkgdelta_core::BumpType;
use pkgdelta_hash::ExclusionRules;
use pkgdelta_manifest::MANIFEST_FILE;

use crate::{OperationError, Result};

pub const DEFAULT_SCAN_ROOT: &str = "packages";
pub const DEFAULT_PREFIX_PATH: &str = "./";
pub const DEFAULT_HASH_FILE: &str = ".cicd/hash.json";
pub const DEFAULT_DEPENDENCIES_FILE: &str = "dependencies.json";
pub const DEFAULT_EXCLUDED_FOLDERS: [&str; 3] = ["node_modules", "coverage", "dist"];
pub const DEFAULT_EXCLUDED_FILES: [&str; 3] = [".npmrc", "CHANGELOG.md", "README.md"];

/// Every option a run understands, with its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Write resolved versions back into package manifests.
    pub save_version: bool,
    /// Verbose logging; read by the binary when it installs its subscriber.
    pub debug: bool,
    /// Report the aggregate list of changed packages.
    pub changed: bool,
    /// Resolve and report a version per package.
    pub version: bool,
    /// Persist the current hashes as the new snapshot.
    pub hash: bool,
    /// Tag every changed package as `name@version`.
    pub tag: bool,
    pub children: Vec<String>,
    pub prefix_path: PathBuf,
    /// Snapshot location, relative to `prefix_path`.
    pub hash_file: PathBuf,
    pub hash_exclude_folders: Vec<String>,
    pub hash_exclude_files: Vec<String>,
    /// Dependency declaration; `None` disables propagation.
    pub dependencies: Option<PathBuf>,
    pub bump: BumpType,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            save_version: false,
            debug: false,
            changed: false,
            version: false,
            hash: false,
            tag: false,
            children: vec![DEFAULT_SCAN_ROOT.to_string()],
            prefix_path: PathBuf::from(DEFAULT_PREFIX_PATH),
            hash_file: PathBuf::from(DEFAULT_HASH_FILE),
            hash_exclude_folders: DEFAULT_EXCLUDED_FOLDERS.map(String::from).to_vec(),
            hash_exclude_files: DEFAULT_EXCLUDED_FILES.map(String::from).to_vec(),
            dependencies: Some(PathBuf::from(DEFAULT_DEPENDENCIES_FILE)),
            bump: BumpType::default(),
        }
    }
}

impl RunConfig {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidConfig`] if no scan root is configured,
    /// a scan root is listed twice, or the snapshot path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.children.is_empty() {
            return Err(OperationError::InvalidConfig(
                "at least one scan root is required".to_string(),
            ));
        }
        if let Some(empty) = self.children.iter().position(String::is_empty) {
            return Err(OperationError::InvalidConfig(format!(
                "scan root #{} is empty",
                empty + 1
            )));
        }
        for (i, child) in self.children.iter().enumerate() {
            if self.children[..i].contains(child) {
                return Err(OperationError::InvalidConfig(format!(
                    "scan root '{child}' is listed more than once"
                )));
            }
        }
        if self.hash_file.as_os_str().is_empty() {
            return Err(OperationError::InvalidConfig(
                "hash file path is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether packages need to be classified at all.
    #[must_use]
    pub fn detects_changes(&self) -> bool {
        self.changed || self.version || self.tag
    }

    #[must_use]
    pub fn resolves_versions(&self) -> bool {
        self.version || self.tag
    }

    /// # Errors
    ///
    /// Returns an error if an exclusion pattern is not a valid glob.
    pub fn exclusion_rules(&self) -> Result<ExclusionRules> {
        Ok(ExclusionRules::new(
            &self.hash_exclude_folders,
            &self.hash_exclude_files,
        )?)
    }

    #[must_use]
    pub fn scan_root_path(&self, package_folder: &str) -> PathBuf {
        self.prefix_path.join(package_folder)
    }

    #[must_use]
    pub fn package_path(&self, package_folder: &str, name: &str) -> PathBuf {
        self.scan_root_path(package_folder).join(name)
    }

    #[must_use]
    pub fn manifest_path(&self, package_folder: &str, name: &str) -> PathBuf {
        self.package_path(package_folder, name).join(MANIFEST_FILE)
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.prefix_path.join(&self.hash_file)
    }
}
