//! `text`: a fixed string from configuration.

use std::sync::Arc;

use async_trait::async_trait;

use super::string_option;
use crate::{Plugin, PluginError};

struct TextPlugin {
    value: String,
}

pub(super) fn create(name: &str, options: &toml::Table) -> Result<Arc<dyn Plugin>, PluginError> {
    let value = string_option(name, options, "value")?
        .ok_or_else(|| PluginError::invalid_options(name, "missing 'value'"))?;
    Ok(Arc::new(TextPlugin {
        value: value.to_owned(),
    }))
}

#[async_trait]
impl Plugin for TextPlugin {
    async fn execute(&self) -> Result<String, PluginError> {
        Ok(self.value.clone())
    }
}
