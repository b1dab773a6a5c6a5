pub mod config;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use config::RunConfig;
pub use error::{OperationError, Result};
