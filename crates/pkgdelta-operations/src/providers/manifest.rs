use std::path::Path;

use pkgdelta_manifest::{PackageManifest, WriteOutcome};

use crate::Result;
use crate::traits::{ManifestReader, ManifestWriter};

pub struct FileSystemManifestIO;

impl FileSystemManifestIO {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemManifestIO {
    fn read_manifest(&self, manifest_path: &Path) -> Result<Option<PackageManifest>> {
        Ok(pkgdelta_manifest::read_manifest(manifest_path)?)
    }
}

impl ManifestWriter for FileSystemManifestIO {
    fn write_version(&self, manifest_path: &Path, version: &str) -> Result<WriteOutcome> {
        Ok(pkgdelta_manifest::write_version(manifest_path, version)?)
    }
}
