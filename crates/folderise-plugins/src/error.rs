//! Plugin errors.

/// Plugin error.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// No built-in plugin with this name.
    #[error("Unknown plugin '{0}'")]
    Unknown(String),
    /// Plugin options are missing or malformed.
    #[error("Invalid options for plugin '{name}': {message}")]
    InvalidOptions {
        /// Plugin name.
        name: String,
        /// What is wrong.
        message: String,
    },
    /// Plugin ran and failed.
    #[error("{0}")]
    Failed(String),
}

impl PluginError {
    pub(crate) fn invalid_options(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}
