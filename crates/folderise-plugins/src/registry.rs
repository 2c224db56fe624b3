//! Plugin registry and serve-time resolution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use folderise_config::PluginConfig;
use futures::future::join_all;

use crate::tokens::{Segment, scan};
use crate::{Plugin, PluginError, PluginRequest, PluginResponse, builtin};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Installed plugins, keyed by token name.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
    timeout: Duration,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PluginRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a registry from configured built-in plugins.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Unknown`] for names without a built-in
    /// implementation, or [`PluginError::InvalidOptions`] for bad options.
    pub fn from_config(configs: &[PluginConfig]) -> Result<Self, PluginError> {
        let mut registry = Self::new();
        for config in configs {
            let plugin = builtin::create(&config.name, &config.options)?;
            registry.register(&config.name, plugin);
            tracing::info!(plugin = %config.name, "Plugin installed");
        }
        Ok(registry)
    }

    /// Bound every plugin call by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Install `plugin` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, plugin: Arc<dyn Plugin>) {
        self.plugins.insert(name.into(), plugin);
    }

    /// Installed plugin names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether no plugin is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Replace every `{{@name}}` token in `html`.
    ///
    /// Each occurrence is executed independently and concurrently; results
    /// are substituted by position once all of them have settled.
    pub async fn resolve(&self, html: &str) -> String {
        let segments = scan(html);
        let names: Vec<&str> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Token(name) => Some(*name),
                Segment::Text(_) => None,
            })
            .collect();
        if names.is_empty() {
            return html.to_owned();
        }

        let results = join_all(names.iter().map(|name| self.execute_one(name))).await;
        let mut results = results.into_iter();

        let mut out = String::with_capacity(html.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Token(_) => {
                    if let Some(result) = results.next() {
                        out.push_str(&result);
                    }
                }
            }
        }
        out
    }

    async fn execute_one(&self, name: &str) -> String {
        let Some(plugin) = self.plugins.get(name) else {
            return format!("{name} is not installed");
        };
        match tokio::time::timeout(self.timeout, plugin.execute()).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::warn!(plugin = %name, error = %e, "Plugin failed");
                format!("{name} failed: {e}")
            }
            Err(_) => {
                tracing::warn!(plugin = %name, "Plugin timed out");
                format!("{name} timed out")
            }
        }
    }

    /// Run every plugin's middleman hook for one page request.
    ///
    /// Hooks run concurrently; a failing hook is logged and does not affect
    /// the others. Returns the merged response adjustments.
    pub async fn run_middlemen(&self, request: &PluginRequest) -> PluginResponse {
        let hooks = self.plugins.iter().map(|(name, plugin)| async move {
            let mut response = PluginResponse::default();
            match tokio::time::timeout(self.timeout, plugin.middleman(request, &mut response))
                .await
            {
                Ok(Ok(())) => Some(response),
                Ok(Err(e)) => {
                    tracing::warn!(plugin = %name, error = %e, "Middleman failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(plugin = %name, "Middleman timed out");
                    None
                }
            }
        });

        let mut merged = PluginResponse::default();
        for response in join_all(hooks).await.into_iter().flatten() {
            merged.merge(response);
        }
        merged
    }
}
