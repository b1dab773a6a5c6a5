use pkgdelta_git::TagInfo;

use crate::Result;

/// Source-control tagging capability.
pub trait TagProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be queried.
    fn tag_exists(&self, rev: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, rev: &str, message: &str) -> Result<TagInfo>;
}
