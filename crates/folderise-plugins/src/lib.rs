//! Plugins for folderise pages.
//!
//! Rendered pages may contain plugin tokens of the form `{{@name}}`. Tokens are
//! stored verbatim in the page cache and only resolved when a page is served,
//! so every request sees fresh plugin output.
//!
//! Resolution is positional: every token occurrence gets its own
//! [`Plugin::execute`] call, and the i-th token is replaced by the i-th result.
//! Unknown names resolve to `"<name> is not installed"`; failing plugins resolve
//! to an inline error string without affecting the other tokens.
//!
//! Plugins may also hook every page request through [`Plugin::middleman`].
//!
//! # Example
//!
//! ```ignore
//! use folderise_plugins::PluginRegistry;
//!
//! let registry = PluginRegistry::from_config(&config.plugins)?;
//! let html = registry.resolve("<p>{{@date}}</p>").await;
//! ```

mod builtin;
mod error;
mod plugin;
mod registry;
mod tokens;

pub use error::PluginError;
pub use plugin::{Plugin, PluginRequest, PluginResponse};
pub use registry::PluginRegistry;
pub use tokens::{Segment, scan};
