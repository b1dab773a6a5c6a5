use std::collections::HashMap;

use pkgdelta_core::{ChangeResult, ChangeStatus, DependencyGraph, Snapshot};
use tracing::debug;

use super::scan::ScannedRoot;

/// Where a full package name lives in the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPackage {
    pub name: String,
    pub package_folder: String,
    pub version: String,
}

/// Maps full package names (dependency graph keys) back to folder names.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    by_full_name: HashMap<String, IndexedPackage>,
}

impl PackageIndex {
    /// Indexes every package with a known full name.
    /// When two folders declare the same full name, the last one scanned wins.
    pub fn build<'a>(roots: impl IntoIterator<Item = &'a ScannedRoot>) -> Self {
        let mut by_full_name = HashMap::new();
        for root in roots {
            for (name, state) in &root.packages {
                let Some(full_name) = &state.full_name else {
                    continue;
                };
                let entry = IndexedPackage {
                    name: name.clone(),
                    package_folder: root.package_folder.clone(),
                    version: state.version.clone(),
                };
                if let Some(previous) = by_full_name.insert(full_name.clone(), entry) {
                    debug!(
                        full_name = %full_name,
                        shadowed = %previous.name,
                        "duplicate full name in scan"
                    );
                }
            }
        }
        Self { by_full_name }
    }

    #[must_use]
    pub fn resolve(&self, full_name: &str) -> Option<&IndexedPackage> {
        self.by_full_name.get(full_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_full_name.len()
    }
}

/// Classifies every package of `root` against `snapshot`.
///
/// A package whose hash differs from the snapshot also marks its direct
/// dependents as changed. Propagation stops after one hop, and a dependent
/// reached several times is reported several times.
#[must_use]
pub fn detect_changes(
    root: &ScannedRoot,
    snapshot: &Snapshot,
    graph: &DependencyGraph,
    index: &PackageIndex,
) -> Vec<ChangeResult> {
    let mut results = Vec::with_capacity(root.packages.len());

    for (name, state) in &root.packages {
        let Some(previous) = snapshot.get(name) else {
            debug!(package_folder = %root.package_folder, name, "NEW");
            results.push(ChangeResult::new(
                name.as_str(),
                root.package_folder.as_str(),
                ChangeStatus::New,
                state.version.as_str(),
            ));
            continue;
        };

        if state.hash == previous.hash {
            debug!(package_folder = %root.package_folder, name, "UNCHANGED");
            results.push(
                ChangeResult::new(
                    name.as_str(),
                    root.package_folder.as_str(),
                    ChangeStatus::Unchanged,
                    state.version.as_str(),
                )
                .with_previous_version(previous.version.clone()),
            );
            continue;
        }

        debug!(package_folder = %root.package_folder, name, "CHANGED");
        results.push(
            ChangeResult::new(
                name.as_str(),
                root.package_folder.as_str(),
                ChangeStatus::Changed,
                state.version.as_str(),
            )
            .with_previous_version(previous.version.clone()),
        );

        let Some(full_name) = &state.full_name else {
            continue;
        };
        for dependent in graph.dependents_of(full_name) {
            let Some(target) = index.resolve(dependent) else {
                debug!(dependent = %dependent, changed = %full_name, "dependent not found in scan");
                continue;
            };
            debug!(
                package_folder = %target.package_folder,
                name = %target.name,
                via = %full_name,
                "CHANGED (dependency)"
            );
            results.push(
                ChangeResult::new(
                    target.name.as_str(),
                    target.package_folder.as_str(),
                    ChangeStatus::Changed,
                    target.version.as_str(),
                )
                .with_previous_version(
                    snapshot.get(&target.name).and_then(|e| e.version.clone()),
                ),
            );
        }
    }

    results
}
