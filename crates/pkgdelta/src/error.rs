use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Expected at least one argument!")]
    NoArguments,

    #[error(transparent)]
    Usage(clap::Error),

    #[error("run failed")]
    Operation(#[from] pkgdelta_operations::OperationError),

    #[error("failed to hash scan roots: {}", .0.join(", "))]
    ScanRootsFailed(Vec<String>),

    #[error("failed to render output")]
    Output(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
