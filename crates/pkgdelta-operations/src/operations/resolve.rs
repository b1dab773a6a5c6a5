use pkgdelta_core::{ChangeResult, ChangeStatus, ResolvedVersion};
use tracing::debug;

use crate::traits::{VersionRequest, VersionStrategy};
use crate::{Result, RunConfig};

pub struct VersionResolver<V> {
    strategy: V,
}

impl<V> VersionResolver<V>
where
    V: VersionStrategy,
{
    pub fn new(strategy: V) -> Self {
        Self { strategy }
    }

    /// Unchanged packages keep their recorded version; new and changed ones
    /// get whatever the strategy computes from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot compute a next version.
    pub fn resolve(&self, result: &ChangeResult, config: &RunConfig) -> Result<ResolvedVersion> {
        let version = match result.status {
            ChangeStatus::Unchanged => result.version.clone(),
            ChangeStatus::New | ChangeStatus::Changed => {
                let manifest_path = config.manifest_path(&result.package_folder, &result.name);
                let request = VersionRequest {
                    name: &result.name,
                    last_version: &result.version,
                    manifest_path: &manifest_path,
                    config,
                    context: result,
                };
                self.strategy.next_version(&request)?
            }
        };

        debug!(
            name = %result.name,
            status = %result.status,
            previous = %result.version,
            version = %version,
            "resolved version"
        );

        Ok(ResolvedVersion {
            name: result.name.clone(),
            package_folder: result.package_folder.clone(),
            status: result.status,
            version,
            previous: result.version.clone(),
        })
    }
}
