//! Plugins shipped with folderise.

mod date;
mod text;
mod visits;

use std::sync::Arc;

use crate::{Plugin, PluginError};

type Factory = fn(&str, &toml::Table) -> Result<Arc<dyn Plugin>, PluginError>;

const FACTORIES: &[(&str, Factory)] = &[
    ("date", date::create),
    ("text", text::create),
    ("visits", visits::create),
];

/// Instantiate the built-in plugin called `name`.
pub(crate) fn create(name: &str, options: &toml::Table) -> Result<Arc<dyn Plugin>, PluginError> {
    FACTORIES
        .iter()
        .find(|(known, _)| *known == name)
        .ok_or_else(|| PluginError::Unknown(name.to_owned()))
        .and_then(|(_, factory)| factory(name, options))
}

/// Read an optional string option.
fn string_option<'a>(
    name: &str,
    options: &'a toml::Table,
    key: &str,
) -> Result<Option<&'a str>, PluginError> {
    match options.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PluginError::invalid_options(
            name,
            format!("'{key}' must be a string"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_is_creatable() {
        let mut options = toml::Table::new();
        options.insert("value".to_owned(), toml::Value::String("hi".to_owned()));
        for (name, _) in FACTORIES {
            assert!(create(name, &options).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            create("nope", &toml::Table::new()),
            Err(PluginError::Unknown(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_non_string_option_rejected() {
        let mut options = toml::Table::new();
        options.insert("value".to_owned(), toml::Value::Integer(3));
        assert!(matches!(
            create("text", &options),
            Err(PluginError::InvalidOptions { .. })
        ));
    }
}
