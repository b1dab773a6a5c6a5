use std::path::Path;

use pkgdelta_core::Snapshot;

use crate::Result;

/// Reads and writes the persisted hash snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Loads the snapshot at `path`.
    /// A missing file yields an empty snapshot and is created so later
    /// writes land on a stable path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is corrupted.
    fn load(&self, path: &Path) -> Result<Snapshot>;

    /// Replaces the snapshot at `path` with `snapshot` in full.
    /// Readers observe either the previous or the new content.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    fn save(&self, path: &Path, snapshot: &Snapshot) -> Result<()>;
}
