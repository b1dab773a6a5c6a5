use std::path::PathBuf;

use pkgdelta_git::{Repository, TagInfo};

use crate::Result;
use crate::traits::TagProvider;

/// Tags the repository that contains `project_root`.
pub struct Git2TagProvider {
    project_root: PathBuf,
}

impl Git2TagProvider {
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }
}

impl TagProvider for Git2TagProvider {
    fn tag_exists(&self, rev: &str) -> Result<bool> {
        let repo = Repository::open(&self.project_root)?;
        Ok(repo.tag_exists(rev)?)
    }

    fn create_tag(&self, rev: &str, message: &str) -> Result<TagInfo> {
        let repo = Repository::open(&self.project_root)?;
        Ok(repo.create_tag(rev, message)?)
    }
}
