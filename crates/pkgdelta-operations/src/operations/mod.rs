mod detect;
mod resolve;
mod run;
mod scan;

pub use detect::{IndexedPackage, PackageIndex, detect_changes};
pub use resolve::VersionResolver;
pub use run::{
    ManifestUpdate, PackageAction, PackageFailure, RootFailure, RootReport, RunOperation,
    RunOutput, TagOutcome,
};
pub use scan::{EXCLUDED_PREFIX, RESERVED_NAMES, ScannedRoot, is_candidate_name, scan_root};
