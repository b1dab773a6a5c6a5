use crate::Result;
use crate::traits::{VersionRequest, VersionStrategy};

/// Bumps the recorded version by the configured [`pkgdelta_core::BumpType`].
pub struct SemverBumpStrategy;

impl SemverBumpStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SemverBumpStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStrategy for SemverBumpStrategy {
    fn next_version(&self, request: &VersionRequest<'_>) -> Result<String> {
        let next = pkgdelta_version::next_version(request.last_version, request.config.bump)?;
        Ok(next.to_string())
    }
}
