use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use pkgdelta_core::{BumpType, DependencyGraph, Snapshot};
use pkgdelta_git::TagInfo;
use pkgdelta_manifest::{ManifestError, PackageManifest, WriteOutcome};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    DependencySource, ManifestReader, ManifestWriter, SnapshotStore, TagProvider,
    VersionRequest, VersionStrategy,
};

fn io_failure(message: &str) -> std::io::Error {
    std::io::Error::other(message.to_string())
}

pub struct MockSnapshotStore {
    snapshot: Snapshot,
    corrupted: bool,
    loads: Mutex<Vec<PathBuf>>,
    saved: Mutex<Vec<(PathBuf, Snapshot)>>,
}

impl MockSnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::new())
    }

    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            corrupted: false,
            loads: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn corrupted() -> Self {
        Self {
            corrupted: true,
            ..Self::new()
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn saved(&self) -> Vec<(PathBuf, Snapshot)> {
        self.saved.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MockSnapshotStore {
    fn load(&self, path: &Path) -> Result<Snapshot> {
        self.loads
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());

        if self.corrupted {
            let source = serde_json::from_str::<Snapshot>("{").expect_err("invalid json");
            return Err(OperationError::SnapshotParse {
                path: path.to_path_buf(),
                source,
            });
        }

        Ok(self.snapshot.clone())
    }

    fn save(&self, path: &Path, snapshot: &Snapshot) -> Result<()> {
        self.saved
            .lock()
            .expect("lock poisoned")
            .push((path.to_path_buf(), snapshot.clone()));
        Ok(())
    }
}

/// Without a graph, every load fails as if the file were missing.
pub struct MockDependencySource {
    graph: Option<DependencyGraph>,
    requested: Mutex<Vec<PathBuf>>,
}

impl MockDependencySource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_graph(graph: DependencyGraph) -> Self {
        Self {
            graph: Some(graph),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockDependencySource {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencySource for MockDependencySource {
    fn load(&self, path: &Path) -> Result<DependencyGraph> {
        self.requested
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());

        self.graph
            .clone()
            .ok_or_else(|| OperationError::DependencyRead {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

/// In-memory manifests keyed by manifest path.
pub struct MockManifestIO {
    manifests: RwLock<HashMap<PathBuf, PackageManifest>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
    failing: HashSet<PathBuf>,
}

impl MockManifestIO {
    #[must_use]
    pub fn new() -> Self {
        Self {
            manifests: RwLock::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            failing: HashSet::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn with_manifest(self, path: impl Into<PathBuf>, name: &str, version: &str) -> Self {
        self.manifests.write().expect("lock poisoned").insert(
            path.into(),
            PackageManifest {
                name: Some(name.to_string()),
                version: Some(version.to_string()),
            },
        );
        self
    }

    /// Version writes to `path` fail; reads still succeed.
    #[must_use]
    pub fn failing_writes_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn manifest(&self, path: &Path) -> Option<PackageManifest> {
        self.manifests
            .read()
            .expect("lock poisoned")
            .get(path)
            .cloned()
    }
}

impl Default for MockManifestIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for MockManifestIO {
    fn read_manifest(&self, manifest_path: &Path) -> Result<Option<PackageManifest>> {
        Ok(self.manifest(manifest_path))
    }
}

impl ManifestWriter for MockManifestIO {
    fn write_version(&self, manifest_path: &Path, version: &str) -> Result<WriteOutcome> {
        if self.failing.contains(manifest_path) {
            return Err(ManifestError::Write {
                path: manifest_path.to_path_buf(),
                source: io_failure("mock write failure"),
            }
            .into());
        }

        self.writes
            .lock()
            .expect("lock poisoned")
            .push((manifest_path.to_path_buf(), version.to_string()));

        let mut manifests = self.manifests.write().expect("lock poisoned");
        let Some(manifest) = manifests.get_mut(manifest_path) else {
            return Ok(WriteOutcome::NotFound);
        };
        if manifest.version.as_deref() == Some(version) {
            return Ok(WriteOutcome::NotNeeded);
        }
        manifest.version = Some(version.to_string());
        Ok(WriteOutcome::Written)
    }
}

pub struct MockTagProvider {
    existing: Mutex<HashSet<String>>,
    created: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
}

impl MockTagProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            existing: Mutex::new(HashSet::new()),
            created: Mutex::new(Vec::new()),
            failing: HashSet::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn with_existing(self, rev: &str) -> Self {
        self.existing
            .lock()
            .expect("lock poisoned")
            .insert(rev.to_string());
        self
    }

    #[must_use]
    pub fn failing_on(mut self, rev: &str) -> Self {
        self.failing.insert(rev.to_string());
        self
    }

    /// Tags created so far as `(rev, message)`.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockTagProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TagProvider for MockTagProvider {
    fn tag_exists(&self, rev: &str) -> Result<bool> {
        Ok(self.existing.lock().expect("lock poisoned").contains(rev))
    }

    fn create_tag(&self, rev: &str, message: &str) -> Result<TagInfo> {
        if self.failing.contains(rev) {
            return Err(pkgdelta_git::GitError::InvalidTagName {
                name: rev.to_string(),
            }
            .into());
        }

        self.existing
            .lock()
            .expect("lock poisoned")
            .insert(rev.to_string());
        self.created
            .lock()
            .expect("lock poisoned")
            .push((rev.to_string(), message.to_string()));

        Ok(TagInfo {
            name: rev.to_string(),
            target_sha: "0000000000000000000000000000000000000000".to_string(),
        })
    }
}

/// Returns a fixed version, or fails, and records every request.
pub struct MockVersionStrategy {
    version: Option<String>,
    requests: Mutex<Vec<(String, String, PathBuf)>>,
}

impl MockVersionStrategy {
    #[must_use]
    pub fn fixed(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            version: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received as `(name, last_version, manifest_path)`.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String, PathBuf)> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl VersionStrategy for MockVersionStrategy {
    fn next_version(&self, request: &VersionRequest<'_>) -> Result<String> {
        self.requests.lock().expect("lock poisoned").push((
            request.name.to_string(),
            request.last_version.to_string(),
            request.manifest_path.to_path_buf(),
        ));

        match &self.version {
            Some(version) => Ok(version.clone()),
            None => Ok(pkgdelta_version::next_version("not-a-version", BumpType::Patch)?
                .to_string()),
        }
    }
}
