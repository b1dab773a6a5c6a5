mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::TagInfo;

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not a git repository or the lookup fails.
pub fn tag_exists(path: &Path, name: &str) -> Result<bool> {
    Repository::open(path)?.tag_exists(name)
}
