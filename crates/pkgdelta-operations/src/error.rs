use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Hash(#[from] pkgdelta_hash::HashError),

    #[error(transparent)]
    Manifest(#[from] pkgdelta_manifest::ManifestError),

    #[error(transparent)]
    Git(#[from] pkgdelta_git::GitError),

    #[error("version calculation failed")]
    VersionCalculation(#[from] pkgdelta_version::VersionError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read snapshot file '{path}'")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot file '{path}'")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot file '{path}' is corrupted")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize snapshot for '{path}'")]
    SnapshotSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read dependency file '{path}'")]
    DependencyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dependency file '{path}'")]
    DependencyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("hashing task for '{package_folder}' did not complete")]
    ScanTask {
        package_folder: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_parse_error_includes_path_and_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let err = OperationError::SnapshotParse {
            path: PathBuf::from(".cicd/hash.json"),
            source,
        };

        assert!(err.to_string().contains(".cicd/hash.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_config_error_message() {
        let err = OperationError::InvalidConfig("no scan roots".to_string());

        assert!(err.to_string().contains("no scan roots"));
    }

    #[test]
    fn version_error_converts_via_from() {
        let version_err = pkgdelta_version::next_version("x", pkgdelta_core::BumpType::Patch)
            .expect_err("invalid version");

        let err: OperationError = version_err.into();

        assert!(matches!(err, OperationError::VersionCalculation(_)));
    }
}
