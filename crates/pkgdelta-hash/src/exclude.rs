use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{HashError, Result};

/// Folder and file names left out of a digest.
///
/// Patterns are matched against an entry's base name at every depth.
/// A plain name matches only itself; `*`, `?` and `[...]` work as globs.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    folders: GlobSet,
    files: GlobSet,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            folders: GlobSet::empty(),
            files: GlobSet::empty(),
        }
    }
}

impl ExclusionRules {
    /// # Errors
    ///
    /// Returns [`HashError::InvalidPattern`] if any pattern is not a valid glob.
    pub fn new<F, P>(folders: F, files: P) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Ok(Self {
            folders: build_set(folders)?,
            files: build_set(files)?,
        })
    }

    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn excludes_folder(&self, name: &str) -> bool {
        self.folders.is_match(name)
    }

    #[must_use]
    pub fn excludes_file(&self, name: &str) -> bool {
        self.files.is_match(name)
    }
}

fn build_set<I>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            continue;
        }
        let glob = Glob::new(pattern).map_err(|source| HashError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| HashError::InvalidPattern {
        pattern: String::from("<set>"),
        source,
    })
}
