use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_VERSION;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

/// Classification of a package against the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    New,
    Changed,
    Unchanged,
}

impl ChangeStatus {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "NEW",
            Self::Changed => "CHANGED",
            Self::Unchanged => "UNCHANGED",
        };
        write!(f, "{s}")
    }
}

/// Current on-disk state of one package inside a scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageState {
    pub hash: String,
    pub version: String,
    pub full_name: Option<String>,
    pub package_folder: String,
}

impl PackageState {
    #[must_use]
    pub fn new(hash: impl Into<String>, package_folder: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            version: DEFAULT_VERSION.to_string(),
            full_name: None,
            package_folder: package_folder.into(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

/// One classification emitted by the change detector.
///
/// `version` is the version currently recorded in the package manifest and
/// `previous_version` the one stored in the snapshot, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeResult {
    pub name: String,
    pub package_folder: String,
    pub status: ChangeStatus,
    pub changed: bool,
    pub version: String,
    pub previous_version: Option<String>,
}

impl ChangeResult {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        package_folder: impl Into<String>,
        status: ChangeStatus,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_folder: package_folder.into(),
            status,
            changed: status.is_changed(),
            version: version.into(),
            previous_version: None,
        }
    }

    #[must_use]
    pub fn with_previous_version(mut self, previous: Option<String>) -> Self {
        self.previous_version = previous;
        self
    }
}

/// Version to report for a classified package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVersion {
    pub name: String,
    pub package_folder: String,
    pub status: ChangeStatus,
    pub version: String,
    pub previous: String,
}

impl ResolvedVersion {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status.is_changed()
    }

    /// The tag name used for this release, `name@version`.
    #[must_use]
    pub fn tag_name(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}
