use std::fs;
use std::io::Write;
use std::path::Path;

use pkgdelta_core::Snapshot;
use tempfile::NamedTempFile;

use crate::Result;
use crate::error::OperationError;
use crate::traits::SnapshotStore;

const EMPTY_SNAPSHOT: &str = "{}";

pub struct FileSystemSnapshotStore;

impl FileSystemSnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for FileSystemSnapshotStore {
    fn load(&self, path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            create_empty(path)?;
            return Ok(Snapshot::new());
        }

        let content = fs::read_to_string(path).map_err(|source| OperationError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Snapshot::new());
        }

        serde_json::from_str(&content).map_err(|source| OperationError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self, path: &Path, snapshot: &Snapshot) -> Result<()> {
        let mut content = serde_json::to_string_pretty(snapshot).map_err(|source| {
            OperationError::SnapshotSerialize {
                path: path.to_path_buf(),
                source,
            }
        })?;
        content.push('\n');

        let write_err = |source| OperationError::SnapshotWrite {
            path: path.to_path_buf(),
            source,
        };

        let dir = parent_dir(path);
        fs::create_dir_all(dir).map_err(write_err)?;

        // rename within the same directory keeps the replacement atomic
        let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
        staged.write_all(content.as_bytes()).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn create_empty(path: &Path) -> Result<()> {
    let write_err = |source| OperationError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(parent_dir(path)).map_err(write_err)?;

    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(mut file) => file.write_all(EMPTY_SNAPSHOT.as_bytes()).map_err(write_err),
        // another scan created it first
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(write_err(source)),
    }
}
