//! Per-render state.

use std::path::{Path, PathBuf};

use folderise_renderer::escape_url;

use crate::RenderError;

/// State for rendering one folder page.
///
/// Created by each render call and dropped once the page HTML exists. Entry
/// lists keep directory listing order, which is not sorted.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Served root folder.
    pub root: PathBuf,
    /// Normalized URL path of the folder: `/` or `/a/b`.
    pub request_path: String,
    /// `request_path` with every segment URL-escaped, for link targets.
    pub url_base: String,
    /// Site title.
    pub title: String,
    /// Absolute folder path: `root` joined with `request_path`.
    pub dir: PathBuf,
    /// Output buffer, starts as the template skeleton.
    pub html: String,
    /// Markdown files.
    pub text_files: Vec<String>,
    /// Subfolders.
    pub subfolders: Vec<String>,
    /// Images.
    pub image_files: Vec<String>,
    /// Other downloadable files.
    pub download_files: Vec<String>,
}

impl RenderContext {
    /// Create a context for `request_path` below `root`.
    ///
    /// Empty and `.` segments are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPath`] if any segment is `..`.
    pub fn new(root: &Path, request_path: &str, title: &str) -> Result<Self, RenderError> {
        let segments = normalize(request_path)?;
        let dir = segments.iter().fold(root.to_path_buf(), |dir, s| dir.join(s));

        Ok(Self {
            root: root.to_path_buf(),
            request_path: format!("/{}", segments.join("/")),
            url_base: format!(
                "/{}",
                segments
                    .iter()
                    .map(|s| escape_url(s))
                    .collect::<Vec<_>>()
                    .join("/")
            ),
            title: title.to_owned(),
            dir,
            html: String::new(),
            text_files: Vec::new(),
            subfolders: Vec::new(),
            image_files: Vec::new(),
            download_files: Vec::new(),
        })
    }

    /// Breadcrumb segments from the root to this folder.
    #[must_use]
    pub fn breadcrumb(&self) -> Vec<&str> {
        self.request_path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Whether this is the root page.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.request_path == "/"
    }
}

/// Split a URL path into folder segments.
pub(crate) fn normalize(request_path: &str) -> Result<Vec<&str>, RenderError> {
    let mut segments = Vec::new();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(RenderError::InvalidPath(request_path.to_owned())),
            s => segments.push(s),
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_context() {
        let ctx = RenderContext::new(Path::new("/srv/site"), "/", "Site").unwrap();
        assert_eq!(ctx.request_path, "/");
        assert_eq!(ctx.dir, PathBuf::from("/srv/site"));
        assert!(ctx.is_root());
        assert!(ctx.breadcrumb().is_empty());
    }

    #[test]
    fn test_nested_context_is_normalized() {
        let ctx = RenderContext::new(Path::new("/srv/site"), "a//b/./", "").unwrap();
        assert_eq!(ctx.request_path, "/a/b");
        assert_eq!(ctx.dir, PathBuf::from("/srv/site/a/b"));
        assert_eq!(ctx.breadcrumb(), vec!["a", "b"]);
        assert!(!ctx.is_root());
    }

    #[test]
    fn test_parent_segments_rejected() {
        let err = RenderContext::new(Path::new("/srv/site"), "/a/../../etc", "").unwrap_err();
        assert!(matches!(err, RenderError::InvalidPath(_)));
    }

    #[test]
    fn test_url_base_escapes_segments() {
        let ctx = RenderContext::new(Path::new("/srv/site"), "/my photos/2024 (May)", "").unwrap();
        assert_eq!(ctx.request_path, "/my photos/2024 (May)");
        assert_eq!(ctx.url_base, "/my%20photos/2024%20%28May%29");
        assert_eq!(ctx.dir, PathBuf::from("/srv/site/my photos/2024 (May)"));
    }

    #[test]
    fn test_backslash_is_part_of_the_name() {
        let ctx = RenderContext::new(Path::new("/srv/site"), "/a\\b", "").unwrap();
        assert_eq!(ctx.breadcrumb(), vec!["a\\b"]);
        assert_eq!(ctx.dir, PathBuf::from("/srv/site/a\\b"));
    }
}
