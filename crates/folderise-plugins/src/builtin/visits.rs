//! `visits`: number of page requests since startup.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::{Plugin, PluginError, PluginRequest, PluginResponse};

#[derive(Default)]
struct VisitsPlugin {
    count: AtomicU64,
}

pub(super) fn create(_name: &str, _options: &toml::Table) -> Result<Arc<dyn Plugin>, PluginError> {
    Ok(Arc::new(VisitsPlugin::default()))
}

#[async_trait]
impl Plugin for VisitsPlugin {
    async fn execute(&self) -> Result<String, PluginError> {
        Ok(self.count.load(Ordering::Relaxed).to_string())
    }

    async fn middleman(
        &self,
        _request: &PluginRequest,
        _response: &mut PluginResponse,
    ) -> Result<(), PluginError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
