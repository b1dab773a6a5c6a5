use std::collections::HashSet;
use std::fmt;

use futures::future::join_all;
use pkgdelta_core::{
    ChangeResult, DEFAULT_VERSION, DependencyGraph, ResolvedVersion, Snapshot, SnapshotEntry,
};
use pkgdelta_git::TagInfo;
use pkgdelta_manifest::WriteOutcome;
use tracing::{debug, error, info, warn};

use super::detect::{PackageIndex, detect_changes};
use super::resolve::VersionResolver;
use super::scan::{ScannedRoot, scan_root};
use crate::error::OperationError;
use crate::traits::{
    DependencySource, ManifestReader, ManifestWriter, SnapshotStore, TagProvider,
    VersionStrategy,
};
use crate::{Result, RunConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    ResolveVersion,
    WriteManifest,
    CreateTag,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolveVersion => write!(f, "resolve version"),
            Self::WriteManifest => write!(f, "write manifest"),
            Self::CreateTag => write!(f, "create tag"),
        }
    }
}

/// A per-package step that failed without stopping its siblings.
#[derive(Debug)]
pub struct PackageFailure {
    pub name: String,
    pub package_folder: String,
    pub action: PackageAction,
    pub error: OperationError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub name: String,
    pub package_folder: String,
    pub version: String,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Created(TagInfo),
    AlreadyExists(String),
}

/// Everything one scan root produced.
#[derive(Debug, Default)]
pub struct RootReport {
    pub package_folder: String,
    pub results: Vec<ChangeResult>,
    pub resolved: Vec<ResolvedVersion>,
    pub manifest_updates: Vec<ManifestUpdate>,
    pub tags: Vec<TagOutcome>,
    pub failures: Vec<PackageFailure>,
}

/// A scan root that could not be hashed.
#[derive(Debug)]
pub struct RootFailure {
    pub package_folder: String,
    pub error: OperationError,
}

#[derive(Debug, Default)]
pub struct RunOutput {
    pub roots: Vec<RootReport>,
    pub failed_roots: Vec<RootFailure>,
    /// Names of changed packages across all roots, in emission order.
    pub changed: Vec<String>,
    pub snapshot_written: bool,
}

impl RunOutput {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed_roots.is_empty()
    }

    pub fn results(&self) -> impl Iterator<Item = &ChangeResult> {
        self.roots.iter().flat_map(|root| root.results.iter())
    }

    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedVersion> {
        self.roots.iter().flat_map(|root| root.resolved.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PackageFailure> {
        self.roots.iter().flat_map(|root| root.failures.iter())
    }
}

/// Scans, classifies, versions and records every configured scan root.
pub struct RunOperation<S, D, M, T, V> {
    snapshots: S,
    dependencies: D,
    manifests: M,
    tags: T,
    resolver: VersionResolver<V>,
}

impl<S, D, M, T, V> RunOperation<S, D, M, T, V>
where
    S: SnapshotStore,
    D: DependencySource,
    M: ManifestReader + ManifestWriter,
    T: TagProvider,
    V: VersionStrategy,
{
    pub fn new(snapshots: S, dependencies: D, manifests: M, tags: T, strategy: V) -> Self {
        Self {
            snapshots,
            dependencies,
            manifests,
            tags,
            resolver: VersionResolver::new(strategy),
        }
    }

    /// Runs the whole pipeline once.
    ///
    /// Scan roots are hashed concurrently and the snapshot is loaded after
    /// every scan has finished, so each root is compared against the same
    /// state. The snapshot is written at most once, after all roots settle.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the snapshot cannot
    /// be loaded or saved. Failures confined to a scan root or a package are
    /// reported in [`RunOutput`] instead.
    pub async fn execute(&self, config: &RunConfig) -> Result<RunOutput> {
        config.validate()?;
        let rules = config.exclusion_rules()?;

        let scans = join_all(
            config
                .children
                .iter()
                .map(|folder| scan_root(config, &rules, folder, &self.manifests)),
        )
        .await;

        let mut scanned = Vec::with_capacity(scans.len());
        let mut failed_roots = Vec::new();
        for (folder, scan) in config.children.iter().zip(scans) {
            match scan {
                Ok(root) => {
                    debug!(package_folder = %folder, packages = root.packages.len(), "scanned");
                    scanned.push(root);
                }
                Err(e) => {
                    error!(package_folder = %folder, error = %e, "failed to hash scan root");
                    failed_roots.push(RootFailure {
                        package_folder: folder.clone(),
                        error: e,
                    });
                }
            }
        }

        let snapshot_path = config.snapshot_path();
        let previous = self.snapshots.load(&snapshot_path)?;

        let roots = if config.detects_changes() {
            let graph = self.load_graph(config);
            let index = PackageIndex::build(&scanned);
            join_all(
                scanned
                    .iter()
                    .map(|root| self.process_root(root, &previous, &graph, &index, config)),
            )
            .await
        } else {
            Vec::new()
        };

        let changed = if config.changed {
            roots
                .iter()
                .flat_map(|root| root.results.iter())
                .filter(|result| result.changed)
                .map(|result| result.name.clone())
                .collect()
        } else {
            Vec::new()
        };

        let snapshot_written = if config.hash {
            let next = self.next_snapshot(&previous, &scanned, &failed_roots, config);
            self.snapshots.save(&snapshot_path, &next)?;
            info!(
                path = %snapshot_path.display(),
                packages = next.len(),
                "folder hashes written"
            );
            true
        } else {
            false
        };

        Ok(RunOutput {
            roots,
            failed_roots,
            changed,
            snapshot_written,
        })
    }

    /// A missing or unreadable declaration disables propagation instead of
    /// failing the run.
    fn load_graph(&self, config: &RunConfig) -> DependencyGraph {
        let Some(path) = config
            .dependencies
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
        else {
            return DependencyGraph::new();
        };

        match self.dependencies.load(path) {
            Ok(graph) => {
                debug!(path = %path.display(), targets = graph.len(), "loaded dependencies");
                graph
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "could not load dependency file, changes will not propagate"
                );
                DependencyGraph::new()
            }
        }
    }

    async fn process_root(
        &self,
        root: &ScannedRoot,
        previous: &Snapshot,
        graph: &DependencyGraph,
        index: &PackageIndex,
        config: &RunConfig,
    ) -> RootReport {
        let mut report = RootReport {
            package_folder: root.package_folder.clone(),
            results: detect_changes(root, previous, graph, index),
            ..RootReport::default()
        };

        if !config.resolves_versions() {
            return report;
        }

        for result in &report.results {
            match self.resolver.resolve(result, config) {
                Ok(resolved) => report.resolved.push(resolved),
                Err(e) => {
                    warn!(name = %result.name, error = %e, "could not resolve version");
                    report.failures.push(PackageFailure {
                        name: result.name.clone(),
                        package_folder: result.package_folder.clone(),
                        action: PackageAction::ResolveVersion,
                        error: e,
                    });
                }
            }
        }

        let targets = release_targets(&report.resolved);
        let saves = config.version && config.save_version;

        let (writes, tags) = futures::join!(
            join_all(
                targets
                    .iter()
                    .filter(|_| saves)
                    .map(|resolved| self.write_manifest(resolved, config)),
            ),
            join_all(
                targets
                    .iter()
                    .filter(|_| config.tag)
                    .map(|resolved| self.ensure_tag(resolved)),
            ),
        );

        for write in writes {
            match write {
                Ok(update) => report.manifest_updates.push(update),
                Err(failure) => report.failures.push(failure),
            }
        }
        for tag in tags {
            match tag {
                Ok(outcome) => report.tags.push(outcome),
                Err(failure) => report.failures.push(failure),
            }
        }

        report
    }

    async fn write_manifest(
        &self,
        resolved: &ResolvedVersion,
        config: &RunConfig,
    ) -> std::result::Result<ManifestUpdate, PackageFailure> {
        let path = config.manifest_path(&resolved.package_folder, &resolved.name);
        match self.manifests.write_version(&path, &resolved.version) {
            Ok(outcome) => {
                debug!(name = %resolved.name, version = %resolved.version, ?outcome, "manifest version");
                if outcome == WriteOutcome::NotFound {
                    warn!(path = %path.display(), "no manifest to save the version into");
                }
                Ok(ManifestUpdate {
                    name: resolved.name.clone(),
                    package_folder: resolved.package_folder.clone(),
                    version: resolved.version.clone(),
                    outcome,
                })
            }
            Err(e) => {
                warn!(name = %resolved.name, error = %e, "could not save version");
                Err(failure(resolved, PackageAction::WriteManifest, e))
            }
        }
    }

    async fn ensure_tag(
        &self,
        resolved: &ResolvedVersion,
    ) -> std::result::Result<TagOutcome, PackageFailure> {
        let rev = resolved.tag_name();
        let outcome = match self.tags.tag_exists(&rev) {
            Ok(true) => Ok(TagOutcome::AlreadyExists(rev)),
            Ok(false) => self.tags.create_tag(&rev, &rev).map(TagOutcome::Created),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(TagOutcome::Created(info)) => {
                info!(tag = %info.name, "created tag");
                Ok(TagOutcome::Created(info))
            }
            Ok(existing) => {
                debug!(name = %resolved.name, ?existing, "tag already present");
                Ok(existing)
            }
            Err(e) => {
                warn!(name = %resolved.name, error = %e, "could not create tag");
                Err(failure(resolved, PackageAction::CreateTag, e))
            }
        }
    }

    /// Current hashes of every scanned package plus the previous entries of
    /// roots that failed to scan. Manifests are read again so versions saved
    /// during this run are recorded.
    fn next_snapshot(
        &self,
        previous: &Snapshot,
        scanned: &[ScannedRoot],
        failed_roots: &[RootFailure],
        config: &RunConfig,
    ) -> Snapshot {
        let failed: HashSet<&str> = failed_roots
            .iter()
            .map(|failure| failure.package_folder.as_str())
            .collect();

        let mut next: Snapshot = previous
            .iter()
            .filter(|(_, entry)| {
                entry
                    .package_folder
                    .as_deref()
                    .is_some_and(|folder| failed.contains(folder))
            })
            .map(|(name, entry)| (name.to_string(), entry.clone()))
            .collect();

        for root in scanned {
            for (name, state) in &root.packages {
                let mut state = state.clone();
                let manifest_path = config.manifest_path(&root.package_folder, name);
                match self.manifests.read_manifest(&manifest_path) {
                    Ok(Some(manifest)) => {
                        state.version = manifest
                            .version
                            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
                        state.full_name = manifest.name;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(path = %manifest_path.display(), error = %e, "keeping scanned version");
                    }
                }
                next.insert(name.clone(), SnapshotEntry::from(state));
            }
        }

        next
    }
}

fn failure(resolved: &ResolvedVersion, action: PackageAction, error: OperationError) -> PackageFailure {
    PackageFailure {
        name: resolved.name.clone(),
        package_folder: resolved.package_folder.clone(),
        action,
        error,
    }
}

/// Changed packages in emission order, each `(folder, name)` once.
fn release_targets(resolved: &[ResolvedVersion]) -> Vec<&ResolvedVersion> {
    let mut seen = HashSet::new();
    resolved
        .iter()
        .filter(|resolved| resolved.changed())
        .filter(|resolved| seen.insert((resolved.package_folder.as_str(), resolved.name.as_str())))
        .collect()
}
