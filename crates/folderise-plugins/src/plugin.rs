//! Plugin contract.

use async_trait::async_trait;

use crate::PluginError;

/// Page request as seen by [`Plugin::middleman`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginRequest {
    /// HTTP method.
    pub method: String,
    /// Decoded request path.
    pub path: String,
}

impl PluginRequest {
    /// Create a request description.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// Response adjustments collected from [`Plugin::middleman`] hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginResponse {
    headers: Vec<(String, String)>,
}

impl PluginResponse {
    /// Add a header to the served page.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Headers added so far, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.headers.extend(other.headers);
    }
}

/// A named unit that produces text for `{{@name}}` tokens.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Produce the replacement for one token occurrence.
    async fn execute(&self) -> Result<String, PluginError>;

    /// Hook run once per page request, before the page is produced.
    async fn middleman(
        &self,
        _request: &PluginRequest,
        _response: &mut PluginResponse,
    ) -> Result<(), PluginError> {
        Ok(())
    }
}
