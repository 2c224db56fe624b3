//! Folder site: render, cache and serve folder pages.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use folderise_cache::{DirCache, Invalidation};
use folderise_config::Config;
use folderise_plugins::PluginRegistry;
use folderise_renderer::{MarkdownConverter, PulldownConverter};
use folderise_storage::{MimeOracle, SniffingOracle, WatchEvent, WatchEventKind};

use crate::categorize::categorize;
use crate::context::normalize;
use crate::sections::render_sections;
use crate::template::{TemplateSource, compose};
use crate::{RenderContext, RenderError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a served page came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSource {
    /// Read from the folder's cache artifact.
    Cache,
    /// Rendered for this request.
    Render,
}

/// A page ready to send, with plugin tokens resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServedPage {
    /// Final HTML.
    pub html: String,
    /// Cache hit or fresh render.
    pub source: PageSource,
}

/// A served folder tree.
///
/// Holds the process-wide collaborators (oracle, converter, plugins) built
/// once at startup. Renders carry no shared mutable state: concurrent renders
/// of the same folder both complete and the last cache write wins.
pub struct Site {
    root: PathBuf,
    title: String,
    template: TemplateSource,
    timeout: Duration,
    oracle: Arc<dyn MimeOracle>,
    converter: Arc<dyn MarkdownConverter>,
    plugins: Arc<PluginRegistry>,
    cache: DirCache,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("root", &self.root)
            .field("title", &self.title)
            .field("template", &self.template)
            .field("timeout", &self.timeout)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

impl Site {
    /// Create a site for `root` with explicit collaborators.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        oracle: Arc<dyn MimeOracle>,
        converter: Arc<dyn MarkdownConverter>,
        plugins: Arc<PluginRegistry>,
    ) -> Self {
        Self {
            root: root.into(),
            title: String::new(),
            template: TemplateSource::Builtin,
            timeout: DEFAULT_TIMEOUT,
            oracle,
            converter,
            plugins,
            cache: DirCache::new().with_timeout(DEFAULT_TIMEOUT),
        }
    }

    /// Create a site from loaded configuration with the default oracle and converter.
    #[must_use]
    pub fn from_config(config: &Config, plugins: Arc<PluginRegistry>) -> Self {
        let template = config
            .template
            .clone()
            .map_or(TemplateSource::Builtin, TemplateSource::File);

        Self::new(
            config.folder.clone(),
            Arc::new(SniffingOracle),
            Arc::new(PulldownConverter::default()),
            plugins,
        )
        .with_title(config.title.clone())
        .with_template(template)
        .with_timeout(config.render.timeout())
    }

    /// Set the site title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the page skeleton source.
    #[must_use]
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    /// Bound every I/O call in the render path by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.cache = DirCache::new().with_timeout(timeout);
        self
    }

    /// Served root folder.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installed plugins.
    #[must_use]
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Render the folder at `request_path` and write its cache artifact.
    ///
    /// The returned HTML still contains unresolved plugin tokens.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the path is invalid, is not a folder, or any
    /// step of the pipeline fails. Cache write failures are not errors.
    pub async fn render(&self, request_path: &str) -> Result<String, RenderError> {
        let mut ctx = RenderContext::new(&self.root, request_path, &self.title)?;

        categorize(&mut ctx, self.oracle.as_ref(), self.timeout).await?;
        ctx.html = self.template.load(self.timeout).await?;

        let sections = render_sections(&ctx, self.converter.as_ref(), self.timeout).await?;
        ctx.html = compose(&ctx.html, &ctx.title, &sections);

        self.cache.write(&ctx.dir, &ctx.html).await;
        Ok(ctx.html)
    }

    /// Produce the page for `request_path`: cached HTML if present, otherwise
    /// a fresh render, with plugin tokens resolved either way.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the page has to be rendered and rendering fails.
    pub async fn serve(&self, request_path: &str) -> Result<ServedPage, RenderError> {
        let dir = self.folder_path(request_path)?;

        let (html, source) = if let Some(html) = self.cache.read(&dir).await {
            tracing::debug!(path = %request_path, "Cache hit");
            (html, PageSource::Cache)
        } else {
            tracing::debug!(path = %request_path, "Cache miss, rendering");
            let html = self.render(request_path).await?;
            tracing::debug!(path = %request_path, "Rendered");
            (html, PageSource::Render)
        };

        let html = self.plugins.resolve(&html).await;
        Ok(ServedPage { html, source })
    }

    /// Drop every cache artifact in the tree.
    pub async fn refresh(&self) {
        self.cache.invalidate_recursive(&self.root).await;
    }

    /// Invalidate the cache artifacts made stale by a filesystem change.
    pub async fn handle_watch_event(&self, event: &WatchEvent) {
        let what = match event.kind {
            WatchEventKind::Add => "File has been added",
            WatchEventKind::Change => "File has been changed",
            WatchEventKind::Unlink => "File has been removed",
            WatchEventKind::AddDir => "Directory has been added",
            WatchEventKind::UnlinkDir => "Directory has been removed",
        };
        tracing::info!(kind = %event.kind, path = %event.path.display(), "{what}");

        match Invalidation::for_path(&self.root, &event.path) {
            Some(invalidation) => self.cache.apply(&self.root, &invalidation).await,
            None => {
                tracing::debug!(path = %event.path.display(), "Change outside served folder");
            }
        }
    }

    fn folder_path(&self, request_path: &str) -> Result<PathBuf, RenderError> {
        let segments = normalize(request_path)?;
        Ok(segments.iter().fold(self.root.clone(), |dir, s| dir.join(s)))
    }
}
