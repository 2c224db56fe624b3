//! Mapping from changed paths to cache invalidations.

use std::path::{Path, PathBuf};

use crate::DirCache;

/// Which cache artifacts a filesystem change makes stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invalidation {
    /// Every artifact below the root, root included.
    All,
    /// Only the artifact of this directory.
    One(PathBuf),
}

impl Invalidation {
    /// Decide what to invalidate when `path` changes below `root`.
    ///
    /// Changes to the root itself or to its direct children affect the
    /// navigation of every page. Deeper changes only affect the directory that
    /// contains them. Paths outside `root` yield `None`.
    #[must_use]
    pub fn for_path(root: &Path, path: &Path) -> Option<Self> {
        let item = path.strip_prefix(root).ok()?;
        match item.parent() {
            None => Some(Self::All),
            Some(parent) if parent.as_os_str().is_empty() => Some(Self::All),
            Some(_) => path.parent().map(|dir| Self::One(dir.to_path_buf())),
        }
    }
}

impl DirCache {
    /// Carry out `invalidation` for the tree rooted at `root`.
    pub async fn apply(&self, root: &Path, invalidation: &Invalidation) {
        match invalidation {
            Invalidation::All => self.invalidate_recursive(root).await,
            Invalidation::One(dir) => self.invalidate_one(dir).await,
        }
    }
}
