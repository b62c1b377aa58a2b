//! Flattened configuration section

use crate::config::models::ClientOptions;
use crate::utils::data::parse_timespan;
use crate::utils::error::{ClientError, Result};
use tracing::debug;

/// Separator between path segments, as in `Payments:Timeout`
pub const KEY_DELIMITER: char = ':';

const BASE_ADDRESS_KEYS: &[&str] = &["baseaddress"];
const TIMEOUT_KEYS: &[&str] = &["timeout"];
const HEADER_KEYS: &[&str] = &["defaultrequestheaders", "defaultheaders"];

/// The flattened keys below one client's section
///
/// Keys are relative to the section (`BaseAddress`,
/// `DefaultRequestHeaders:Accept`). When the same key is inserted twice the
/// later value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl ConfigSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&key));
        self.entries.push((key, value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Value of a top-level key, ignoring case and underscores
    pub fn get(&self, key: &str) -> Option<&str> {
        let wanted = normalize(key);
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| !k.contains(KEY_DELIMITER) && normalize(k) == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// `(child key, value)` pairs one level below `parent`
    ///
    /// Child keys keep their original spelling.
    pub fn children(&self, parent: &str) -> Vec<(&str, &str)> {
        let wanted = normalize(parent);
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                let (head, child) = key.split_once(KEY_DELIMITER)?;
                (normalize(head) == wanted && !child.is_empty() && !child.contains(KEY_DELIMITER))
                    .then_some((child, value.as_str()))
            })
            .collect()
    }

    /// Overwrite the fields of `options` that this section sets
    pub fn bind(&self, options: &mut ClientOptions) -> Result<()> {
        if let Some(base_address) = self.first_of(BASE_ADDRESS_KEYS) {
            options.base_address = base_address.to_string();
        }

        if let Some(timeout) = self.first_of(TIMEOUT_KEYS) {
            options.timeout = parse_timespan(timeout).map_err(|e| {
                ClientError::config(format!(
                    "{}{}Timeout has invalid value: {}",
                    self.name, KEY_DELIMITER, e
                ))
            })?;
        }

        for parent in HEADER_KEYS {
            for (name, value) in self.children(parent) {
                options
                    .default_headers
                    .insert(name.to_ascii_lowercase(), value.to_string());
            }
        }

        debug!(section = %self.name, keys = self.entries.len(), "Bound configuration section");
        Ok(())
    }

    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
