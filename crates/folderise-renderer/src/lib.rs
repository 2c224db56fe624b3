//! Markdown conversion for folderise pages.
//!
//! Every section of a folder page is assembled as markdown and converted to
//! HTML through a [`MarkdownConverter`]. The default implementation,
//! [`PulldownConverter`], is backed by `pulldown-cmark` and configured once
//! with [`ConvertOptions`] (GitHub-flavored markdown, soft breaks rendered as
//! line breaks).
//!
//! Filenames are user-controlled, so anything that ends up in a link goes
//! through [`escape_markdown`] (link text) or [`escape_url`] (link target).
//!
//! # Example
//!
//! ```
//! use folderise_renderer::{MarkdownConverter, PulldownConverter, escape_url, make_link};
//!
//! let converter = PulldownConverter::default();
//! let md = make_link("notes", &format!("/docs/{}", escape_url("my notes.txt")));
//! let html = converter.convert(&md).unwrap();
//! assert_eq!(html, "<p><a href=\"/docs/my%20notes.txt\">notes</a></p>\n");
//! ```

mod escape;
mod markdown;

pub use escape::{escape_markdown, escape_url, join_url, make_link};
pub use markdown::{ConvertError, ConvertOptions, MarkdownConverter, PulldownConverter};
