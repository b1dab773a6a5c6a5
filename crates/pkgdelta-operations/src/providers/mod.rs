mod dependency_source;
mod git;
mod manifest;
mod snapshot_store;
mod version_strategy;

pub use dependency_source::JsonDependencySource;
pub use git::Git2TagProvider;
pub use manifest::FileSystemManifestIO;
pub use snapshot_store::FileSystemSnapshotStore;
pub use version_strategy::SemverBumpStrategy;
