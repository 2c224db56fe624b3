//! Cache artifacts stored next to the content they render.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use folderise_storage::is_hidden_name;
use futures::future::join_all;

/// Name of the cache artifact written into every rendered directory.
pub const CACHE_FILENAME: &str = "_tmp.html";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Disk-backed page cache keyed by directory.
#[derive(Clone, Debug)]
pub struct DirCache {
    timeout: Duration,
}

impl Default for DirCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DirCache {
    /// Create a cache with the default I/O timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound every cache I/O call by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the cache artifact for `dir`.
    #[must_use]
    pub fn artifact_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILENAME)
    }

    /// Read the cached rendering of `dir`.
    ///
    /// Returns `None` on any failure, including a missing artifact.
    pub async fn read(&self, dir: &Path) -> Option<String> {
        let path = Self::artifact_path(dir);
        match tokio::time::timeout(self.timeout, tokio::fs::read_to_string(&path)).await {
            Ok(Ok(html)) => Some(html),
            Ok(Err(e)) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "Cache read failed");
                }
                None
            }
            Err(_) => {
                tracing::warn!(path = %path.display(), "Cache read timed out");
                None
            }
        }
    }

    /// Persist `html` as the rendering of `dir`.
    ///
    /// Failures are logged and swallowed.
    pub async fn write(&self, dir: &Path, html: &str) {
        let path = Self::artifact_path(dir);
        match tokio::time::timeout(self.timeout, tokio::fs::write(&path, html)).await {
            Ok(Ok(())) => tracing::debug!(path = %path.display(), "Cache written"),
            Ok(Err(e)) => tracing::warn!(path = %path.display(), error = %e, "Cache write failed"),
            Err(_) => tracing::warn!(path = %path.display(), "Cache write timed out"),
        }
    }

    /// Delete the cache artifact of `dir`, ignoring errors.
    pub async fn invalidate_one(&self, dir: &Path) {
        let path = Self::artifact_path(dir);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Cache invalidated"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "Cache delete failed"),
        }
    }

    /// Delete the cache artifact of `root` and of every non-hidden directory below it.
    ///
    /// Sibling directories are processed concurrently.
    pub async fn invalidate_recursive(&self, root: &Path) {
        tracing::info!(root = %root.display(), "Clearing page cache");
        self.invalidate_tree(root).await;
    }

    fn invalidate_tree<'a>(
        &'a self,
        dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.invalidate_one(dir).await;
            let subdirs = subdirectories(dir).await;
            join_all(subdirs.iter().map(|sub| self.invalidate_tree(sub))).await;
        })
    }
}

/// Non-hidden child directories of `dir`. Listing errors yield an empty list.
async fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "Cannot list directory");
            return Vec::new();
        }
    };

    let mut dirs = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        if is_hidden_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        // Symlinked folders are rendered like any other, so follow them here too.
        let path = entry.path();
        if !tokio::fs::metadata(&path)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            continue;
        }
        let is_link = entry.file_type().await.is_ok_and(|t| t.is_symlink());
        if is_link && links_to_ancestor(dir, &path).await {
            tracing::debug!(path = %path.display(), "Skipping symlink cycle");
            continue;
        }
        dirs.push(path);
    }
    dirs
}

/// Whether `link` resolves to `dir` or one of its ancestors.
async fn links_to_ancestor(dir: &Path, link: &Path) -> bool {
    match (
        tokio::fs::canonicalize(dir).await,
        tokio::fs::canonicalize(link).await,
    ) {
        (Ok(dir), Ok(target)) => dir.starts_with(target),
        _ => true,
    }
}
