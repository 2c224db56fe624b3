//! Folder pages for folderise.
//!
//! A [`Site`] turns any folder below its root into an HTML page:
//!
//! 1. The folder's visible entries are classified by MIME type into
//!    subfolders, images, downloads and markdown files ([`categorize`]).
//! 2. Navigation, content, image gallery and resource list are rendered
//!    concurrently, each as markdown converted to HTML ([`Sections`]).
//! 3. The fragments are substituted into the page skeleton ([`compose`]).
//! 4. The result is written to the folder's `_tmp.html` cache artifact.
//!
//! [`Site::serve`] reads the cache artifact first and only renders on a miss.
//! Plugin tokens (`{{@name}}`) are cached verbatim and resolved on every serve.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folderise_plugins::PluginRegistry;
//! use folderise_site::Site;
//!
//! let plugins = Arc::new(PluginRegistry::from_config(&config.plugins)?);
//! let site = Site::from_config(&config, plugins);
//! let page = site.serve("/photos/2024").await?;
//! ```

mod categorize;
mod context;
mod error;
mod sections;
mod site;
mod template;

pub use categorize::{Category, categorize, classify};
pub use context::RenderContext;
pub use error::RenderError;
pub use sections::Sections;
pub use site::{PageSource, ServedPage, Site};
pub use template::{BUILTIN_TEMPLATE, TemplateSource, compose};
