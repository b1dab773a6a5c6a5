use pkgdelta_core::BumpType;
use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version '{version}'")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },
}

#[must_use]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Version {
    let mut new_version = version.clone();
    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;

    match bump_type {
        BumpType::Major => {
            new_version.major += 1;
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpType::Minor => {
            new_version.minor += 1;
            new_version.patch = 0;
        }
        BumpType::Patch => {
            new_version.patch += 1;
        }
    }

    new_version
}

/// Parses `current` and bumps it.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if `current` is not valid semver.
pub fn next_version(current: &str, bump_type: BumpType) -> Result<Version, VersionError> {
    let version = Version::parse(current.trim()).map_err(|source| VersionError::InvalidVersion {
        version: current.to_string(),
        source,
    })?;
    Ok(bump_version(&version, bump_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        Version::parse(s).expect("valid version")
    }

    #[test]
    fn bump_patch() {
        let bumped = bump_version(&version("1.2.3"), BumpType::Patch);
        assert_eq!(bumped, version("1.2.4"));
    }

    #[test]
    fn bump_minor() {
        let bumped = bump_version(&version("1.2.3"), BumpType::Minor);
        assert_eq!(bumped, version("1.3.0"));
    }

    #[test]
    fn bump_major() {
        let bumped = bump_version(&version("1.2.3"), BumpType::Major);
        assert_eq!(bumped, version("2.0.0"));
    }

    #[test]
    fn bump_drops_prerelease_and_build() {
        let bumped = bump_version(&version("1.2.3-beta.1+sha.abc"), BumpType::Patch);
        assert_eq!(bumped, version("1.2.4"));
    }

    #[test]
    fn next_version_from_default() {
        let next = next_version("0.0.0", BumpType::Patch).expect("valid version");
        assert_eq!(next.to_string(), "0.0.1");
    }

    #[test]
    fn next_version_rejects_invalid_input() {
        let result = next_version("not-a-version", BumpType::Patch);
        assert!(matches!(result, Err(VersionError::InvalidVersion { .. })));
    }
}
