use std::path::Path;

use pkgdelta_core::ChangeResult;

use crate::{Result, RunConfig};

/// Everything a strategy may consult when computing a next version.
#[derive(Debug, Clone, Copy)]
pub struct VersionRequest<'a> {
    pub name: &'a str,
    pub last_version: &'a str,
    pub manifest_path: &'a Path,
    pub config: &'a RunConfig,
    pub context: &'a ChangeResult,
}

/// Policy for the version of a new or changed package.
pub trait VersionStrategy: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no next version can be derived for the package.
    fn next_version(&self, request: &VersionRequest<'_>) -> Result<String>;
}
