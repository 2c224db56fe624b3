//! `date`: the current local time.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};

use super::string_option;
use crate::{Plugin, PluginError};

const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M";

struct DatePlugin {
    format: String,
}

pub(super) fn create(name: &str, options: &toml::Table) -> Result<Arc<dyn Plugin>, PluginError> {
    let format = string_option(name, options, "format")?.unwrap_or(DEFAULT_FORMAT);
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(PluginError::invalid_options(
            name,
            format!("invalid format '{format}'"),
        ));
    }
    Ok(Arc::new(DatePlugin {
        format: format.to_owned(),
    }))
}

#[async_trait]
impl Plugin for DatePlugin {
    async fn execute(&self) -> Result<String, PluginError> {
        let mut out = String::new();
        write!(out, "{}", chrono::Local::now().format(&self.format))
            .map_err(|_| PluginError::Failed(format!("cannot format date with '{}'", self.format)))?;
        Ok(out)
    }
}
