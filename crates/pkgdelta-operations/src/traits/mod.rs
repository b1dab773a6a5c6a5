mod dependency_source;
mod manifest_io;
mod snapshot_store;
mod tag_provider;
mod version_strategy;

pub use dependency_source::DependencySource;
pub use manifest_io::{ManifestReader, ManifestWriter};
pub use snapshot_store::SnapshotStore;
pub use tag_provider::TagProvider;
pub use version_strategy::{VersionRequest, VersionStrategy};
