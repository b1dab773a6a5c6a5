//! Content hashing of package folders.
//!
//! A folder digest covers its own name and the digests of every entry below
//! it, combined in file-name order, so the result only depends on the tree's
//! content and never on the order the filesystem lists entries in.

mod error;
mod exclude;
mod folder;

pub use error::HashError;
pub use exclude::ExclusionRules;
pub use folder::{EntryKind, FolderHash, HashedEntry, hash_folder};

pub type Result<T> = std::result::Result<T, HashError>;
