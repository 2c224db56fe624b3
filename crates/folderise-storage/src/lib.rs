//! Filesystem collaborators for folderise.
//!
//! This crate provides the two pieces of the render pipeline that talk to the
//! filesystem on their own terms:
//!
//! - [`MimeOracle`]: classifies a path into a MIME-type-like string. The
//!   default [`SniffingOracle`] reports directories as `inode/directory`,
//!   guesses by extension with `mime_guess`, and sniffs file content to tell
//!   plain text from binary data.
//! - [`FsWatcher`]: watches the served folder with `notify` and emits debounced
//!   [`WatchEvent`]s (`add`, `change`, `unlink`, `addDir`, `unlinkDir`). Paths
//!   with a hidden or underscore-prefixed component are never reported.
//!
//! # Example
//!
//! ```ignore
//! use folderise_storage::FsWatcher;
//!
//! let watcher = FsWatcher::new(root.clone());
//! let (mut events, _handle) = watcher.watch()?;
//! while let Some(event) = events.recv().await {
//!     println!("{} {}", event.kind, event.path.display());
//! }
//! ```

mod debouncer;
mod event;
mod oracle;
mod watch;

pub use event::{WatchEvent, WatchEventKind, is_hidden_name, is_hidden_path};
pub use oracle::{DIRECTORY_MIME, EMPTY_MIME, MimeOracle, OracleError, SniffingOracle};
pub use watch::{FsWatcher, WatchError, WatchHandle};
