use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to read folder '{path}'")]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a folder")]
    NotAFolder { path: PathBuf },

    #[error("invalid exclusion pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
