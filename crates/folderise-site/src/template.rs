//! Page skeleton loading and placeholder substitution.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};

use crate::error::bounded;
use crate::{RenderError, Sections};

/// Skeleton used when no template file is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("../assets/template.html");

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(title|navigation|content|images|downloads)\}\}").unwrap()
});

/// Where the page skeleton comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The skeleton compiled into the binary.
    #[default]
    Builtin,
    /// A file read from disk on every render.
    File(PathBuf),
}

impl TemplateSource {
    /// Load the skeleton text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateLoad`] if the file cannot be read.
    pub async fn load(&self, timeout: Duration) -> Result<String, RenderError> {
        match self {
            Self::Builtin => Ok(BUILTIN_TEMPLATE.to_owned()),
            Self::File(path) => bounded(
                timeout,
                || format!("Loading template {}", path.display()),
                tokio::fs::read_to_string(path),
            )
            .await?
            .map_err(|source| RenderError::TemplateLoad {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// Substitute every `{{title}}`, `{{navigation}}`, `{{content}}`, `{{images}}`
/// and `{{downloads}}` in `skeleton`.
///
/// Substitution is literal and single-pass: text inserted for one placeholder
/// is never scanned for another.
#[must_use]
pub fn compose(skeleton: &str, title: &str, sections: &Sections) -> String {
    PLACEHOLDER_RE
        .replace_all(skeleton, |caps: &Captures<'_>| match &caps[1] {
            "title" => title,
            "navigation" => sections.navigation.as_str(),
            "content" => sections.content.as_str(),
            "images" => sections.images.as_str(),
            _ => sections.downloads.as_str(),
        })
        .into_owned()
}
