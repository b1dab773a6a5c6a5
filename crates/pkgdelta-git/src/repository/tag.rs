use crate::{GitError, Result, TagInfo};

use super::Repository;

fn tag_ref(name: &str) -> Result<String> {
    let refname = format!("refs/tags/{name}");
    if git2::Reference::is_valid_name(&refname) {
        Ok(refname)
    } else {
        Err(GitError::InvalidTagName {
            name: name.to_string(),
        })
    }
}

impl Repository {
    /// # Errors
    ///
    /// Returns an error if the tag name is invalid or the lookup fails.
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        let refname = tag_ref(name)?;
        match self.inner.find_reference(&refname) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        tag_ref(name)?;
        let head = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, head.as_object(), &sig, message, false)?;

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: head.id().to_string(),
        })
    }
}
