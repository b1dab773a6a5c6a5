use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::{ExclusionRules, HashError, Result};

const FILE_TAG: &[u8] = b"f";
const FOLDER_TAG: &[u8] = b"d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// Digest of one immediate child of a hashed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedEntry {
    pub name: String,
    pub hash: String,
    pub kind: EntryKind,
}

/// Digest of a folder plus the digests of its immediate children,
/// sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderHash {
    pub name: String,
    pub hash: String,
    pub children: Vec<HashedEntry>,
}

impl FolderHash {
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&HashedEntry> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A folder whose children are still being walked.
struct OpenFolder {
    path: PathBuf,
    name: OsString,
    children: Vec<HashedEntry>,
    readable: bool,
}

impl OpenFolder {
    fn new(path: &Path, name: OsString) -> Self {
        Self {
            path: path.to_path_buf(),
            name,
            children: Vec::new(),
            readable: true,
        }
    }

    fn digest(&self) -> String {
        combine(&self.name, &self.children)
    }
}

/// Hashes the folder at `path`.
///
/// Children that vanish, cannot be read or link back to one of their own
/// ancestors are left out of the digest.
///
/// # Errors
///
/// Returns [`HashError::ReadRoot`] if `path` cannot be listed and
/// [`HashError::NotAFolder`] if it is not a directory.
pub fn hash_folder(path: &Path, rules: &ExclusionRules) -> Result<FolderHash> {
    let metadata = fs::metadata(path).map_err(|source| HashError::ReadRoot {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(HashError::NotAFolder {
            path: path.to_path_buf(),
        });
    }

    let root_name = path
        .file_name()
        .map_or_else(|| path.as_os_str().to_os_string(), OsStr::to_os_string);
    let mut open = vec![OpenFolder::new(path, root_name)];

    let walker = WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, rules));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.path() == Some(path) {
                    return Err(HashError::ReadRoot {
                        path: path.to_path_buf(),
                        source: io::Error::from(e),
                    });
                }
                skip_unreadable(&mut open, &e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        while open.len() > entry.depth() {
            close_folder(&mut open);
        }

        if entry.file_type().is_dir() {
            open.push(OpenFolder::new(entry.path(), entry.file_name().to_os_string()));
            continue;
        }
        if !entry.file_type().is_file() {
            debug!(path = %entry.path().display(), "skipping special file");
            continue;
        }

        match hash_file(entry.path(), entry.file_name()) {
            Ok(hash) => {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(HashedEntry {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        hash,
                        kind: EntryKind::File,
                    });
                }
            }
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping unreadable entry");
            }
        }
    }

    while open.len() > 1 {
        close_folder(&mut open);
    }
    let root = open.pop().ok_or_else(|| HashError::NotAFolder {
        path: path.to_path_buf(),
    })?;

    Ok(FolderHash {
        name: root.name.to_string_lossy().into_owned(),
        hash: root.digest(),
        children: root.children,
    })
}

fn is_excluded(entry: &DirEntry, rules: &ExclusionRules) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        rules.excludes_folder(&name)
    } else {
        rules.excludes_file(&name)
    }
}

fn skip_unreadable(open: &mut [OpenFolder], error: &walkdir::Error) {
    if let Some(folder) = open
        .last_mut()
        .filter(|folder| error.path() == Some(folder.path.as_path()))
    {
        folder.readable = false;
    }
    match error.loop_ancestor() {
        Some(ancestor) => debug!(
            path = ?error.path(),
            ancestor = %ancestor.display(),
            "skipping symlink loop"
        ),
        None => debug!(path = ?error.path(), error = %error, "entry vanished during scan"),
    }
}

fn close_folder(open: &mut Vec<OpenFolder>) {
    let Some(folder) = open.pop() else {
        return;
    };
    if !folder.readable {
        return;
    }
    let hash = folder.digest();
    if let Some(parent) = open.last_mut() {
        parent.children.push(HashedEntry {
            name: folder.name.to_string_lossy().into_owned(),
            hash,
            kind: EntryKind::Folder,
        });
    }
}

fn tagged_hasher(tag: &[u8], name: &OsStr) -> Sha256 {
    let name = name.as_encoded_bytes();
    let mut hasher = Sha256::new();
    hasher.update(tag);
    hasher.update((name.len() as u64).to_le_bytes());
    hasher.update(name);
    hasher
}

fn hash_file(path: &Path, name: &OsStr) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = tagged_hasher(FILE_TAG, name);

    let mut buffer = [0u8; 8192];
    loop {
        let count = file.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    Ok(hex::encode(hasher.finalize()))
}

fn combine(name: &OsStr, children: &[HashedEntry]) -> String {
    let mut hasher = tagged_hasher(FOLDER_TAG, name);
    for child in children {
        hasher.update(child.hash.as_bytes());
    }
    hex::encode(hasher.finalize())
}
