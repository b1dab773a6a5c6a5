use std::path::Path;

use pkgdelta_manifest::{PackageManifest, WriteOutcome};

use crate::Result;

pub trait ManifestReader: Send + Sync {
    /// Returns `Ok(None)` if the manifest does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    fn read_manifest(&self, manifest_path: &Path) -> Result<Option<PackageManifest>>;
}

pub trait ManifestWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written.
    fn write_version(&self, manifest_path: &Path, version: &str) -> Result<WriteOutcome>;
}
