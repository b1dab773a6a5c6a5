mod error;
mod reader;
mod writer;

pub use error::ManifestError;
pub use reader::{PackageManifest, read_document, read_manifest};
pub use writer::{WriteOutcome, write_version};

/// File name of a package manifest inside a package folder.
pub const MANIFEST_FILE: &str = "package.json";
