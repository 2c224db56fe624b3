//! Page cache for folderise.
//!
//! Every rendered directory keeps its last rendering in a file named
//! [`CACHE_FILENAME`] inside the directory itself. The presence of that file is
//! the whole validity contract: there is no index, timestamp or hash.
//!
//! - [`DirCache`]: read, write and delete cache artifacts. All failures are
//!   logged and swallowed; a failed read is a miss, a failed write or delete is
//!   ignored.
//! - [`Invalidation`]: maps a changed path to the set of artifacts to drop.
//!   A change directly below the root drops every artifact in the tree; a deeper
//!   change drops only the artifact of the directory containing it.
//!
//! # Example
//!
//! ```ignore
//! use folderise_cache::{DirCache, Invalidation};
//!
//! let cache = DirCache::new();
//! cache.write(&dir, "<html></html>").await;
//! assert_eq!(cache.read(&dir).await.as_deref(), Some("<html></html>"));
//!
//! if let Some(invalidation) = Invalidation::for_path(&root, &changed) {
//!     cache.apply(&root, &invalidation).await;
//! }
//! ```

mod dir;
mod policy;

pub use dir::{CACHE_FILENAME, DirCache};
pub use policy::Invalidation;
