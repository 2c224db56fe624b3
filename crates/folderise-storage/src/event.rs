//! Watch event types.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Kind of filesystem change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WatchEventKind {
    /// File was created.
    Add,
    /// File content changed.
    Change,
    /// File was removed.
    Unlink,
    /// Directory was created.
    AddDir,
    /// Directory was removed.
    UnlinkDir,
}

impl fmt::Display for WatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Unlink => "unlink",
            Self::AddDir => "addDir",
            Self::UnlinkDir => "unlinkDir",
        };
        f.write_str(name)
    }
}

/// A filesystem change below the watched root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchEvent {
    /// Kind of change.
    pub kind: WatchEventKind,
    /// Absolute path of the changed entry.
    pub path: PathBuf,
}

impl WatchEvent {
    /// Create a new event.
    #[must_use]
    pub fn new(kind: WatchEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Whether a single entry name is hidden (`.`-prefixed) or private (`_`-prefixed).
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Whether any component of `path` below `root` is hidden or private.
///
/// Paths outside `root` are checked component by component in full.
#[must_use]
pub fn is_hidden_path(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| match c {
        Component::Normal(name) => is_hidden_name(&name.to_string_lossy()),
        _ => false,
    })
}
