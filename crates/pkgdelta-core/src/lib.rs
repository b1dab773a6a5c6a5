mod graph;
mod snapshot;
pub mod types;

pub use graph::DependencyGraph;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use types::*;

/// Version recorded for packages that have no manifest.
pub const DEFAULT_VERSION: &str = "0.0.0";
