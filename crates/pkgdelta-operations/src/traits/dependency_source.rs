use std::path::Path;

use pkgdelta_core::DependencyGraph;

use crate::Result;

pub trait DependencySource: Send + Sync {
    /// Builds the reverse dependency graph from the declaration at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<DependencyGraph>;
}
