//! In-memory configuration source

use super::section::{ConfigSection, KEY_DELIMITER};
use super::ConfigurationSource;
use crate::utils::error::Result;

/// Flat `Section:Key = value` pairs held in memory
///
/// ```
/// use external_clients::config::binding::{ConfigurationSource, InMemoryConfiguration};
///
/// let config = InMemoryConfiguration::new()
///     .with("ConfigTestClient:BaseAddress", "http://config.com")
///     .with("ConfigTestClient:Timeout", "00:00:05");
///
/// let section = config.section("ConfigTestClient").unwrap().unwrap();
/// assert_eq!(section.get("BaseAddress"), Some("http://config.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfiguration {
    values: Vec<(String, String)>,
}

impl InMemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InMemoryConfiguration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigurationSource for InMemoryConfiguration {
    fn section(&self, name: &str) -> Result<Option<ConfigSection>> {
        let mut section = ConfigSection::new(name);
        for (key, value) in &self.values {
            if let Some((head, rest)) = key.split_once(KEY_DELIMITER) {
                if head.eq_ignore_ascii_case(name) && !rest.is_empty() {
                    section.insert(rest, value.as_str());
                }
            }
        }
        Ok((!section.is_empty()).then_some(section))
    }
}
