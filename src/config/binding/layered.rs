//! Layered file and environment configuration via the `config` crate

use super::section::{ConfigSection, KEY_DELIMITER};
use super::ConfigurationSource;
use crate::utils::error::{ClientError, Result};
use config::{Config, ConfigError, Environment, File, Map, Source, Value, ValueKind};
use std::path::PathBuf;
use tracing::{debug, info};

/// Separator for nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

impl ConfigurationSource for Config {
    fn section(&self, name: &str) -> Result<Option<ConfigSection>> {
        let root = self.collect()?;
        let Some((_, value)) = root.into_iter().find(|(key, _)| key.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };

        let mut section = ConfigSection::new(name);
        flatten(value, None, &mut section)?;
        Ok((!section.is_empty()).then_some(section))
    }
}

fn flatten(value: Value, prefix: Option<&str>, section: &mut ConfigSection) -> Result<()> {
    let join = |key: &str| match prefix {
        Some(prefix) => format!("{}{}{}", prefix, KEY_DELIMITER, key),
        None => key.to_string(),
    };

    match value.kind {
        ValueKind::Table(table) => {
            for (key, child) in table {
                flatten(child, Some(&join(&key)), section)?;
            }
        }
        ValueKind::Array(items) => {
            for (index, child) in items.into_iter().enumerate() {
                flatten(child, Some(&join(&index.to_string())), section)?;
            }
        }
        ValueKind::Nil => {}
        kind => {
            let key = prefix.ok_or_else(|| {
                ClientError::config(format!(
                    "Section '{}' must be a table, not a single value",
                    section.name()
                ))
            })?;
            let text = Value::new(None, kind).into_string()?;
            section.insert(key, text);
        }
    }
    Ok(())
}

/// Lowercases every table key of the wrapped source
///
/// The environment source always produces lowercase keys. Files are folded
/// to the same spelling so a later layer overrides `Payments.Timeout` no
/// matter how either layer spells it.
#[derive(Debug, Clone)]
struct LowercaseKeys<S>(S);

impl<S> Source for LowercaseKeys<S>
where
    S: Source + Clone + Send + Sync + 'static,
{
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> std::result::Result<Map<String, Value>, ConfigError> {
        Ok(lowercase_table(self.0.collect()?))
    }
}

fn lowercase_table(table: Map<String, Value>) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), lowercase_value(value)))
        .collect()
}

fn lowercase_value(mut value: Value) -> Value {
    value.kind = match value.kind {
        ValueKind::Table(table) => ValueKind::Table(lowercase_table(table)),
        ValueKind::Array(items) => {
            ValueKind::Array(items.into_iter().map(lowercase_value).collect())
        }
        kind => kind,
    };
    value
}

/// Builds a layered [`Config`] from files and environment variables
///
/// Later layers override earlier ones. Environment variables use `__` as
/// the nesting separator, so `APP__PAYMENTS__TIMEOUT=00:00:02` overrides
/// `Payments:Timeout` when the prefix is `APP`. Keys of every layer are
/// lowercased, header names included.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationLoader {
    files: Vec<(PathBuf, bool)>,
    env_prefix: Option<String>,
    overrides: Vec<(String, String)>,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file that must exist; the format follows the extension
    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), true));
        self
    }

    /// Add a file that is skipped when missing
    pub fn add_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), false));
        self
    }

    /// Read environment variables starting with `prefix__`
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Set a single value on top of every other layer, as `Section.Key`
    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut builder = Config::builder();

        for (path, required) in &self.files {
            debug!(path = %path.display(), required, "Adding configuration file");
            builder = builder.add_source(LowercaseKeys(
                File::from(path.as_path()).required(*required),
            ));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            );
        }

        for (key, value) in &self.overrides {
            builder = builder.set_override(key.to_lowercase(), value.as_str())?;
        }

        let config = builder.build()?;
        info!(
            files = self.files.len(),
            env_prefix = self.env_prefix.as_deref().unwrap_or(""),
            "Loaded external client configuration"
        );
        Ok(config)
    }
}
