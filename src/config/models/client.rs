//! External client options

use crate::utils::data::timespan::serde_timespan;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeout applied when no registration sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Smallest accepted timeout (inclusive)
pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);
/// Largest accepted timeout (inclusive)
pub const MAX_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for one named external HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Absolute `http`/`https` URL every relative request path is resolved against
    #[serde(alias = "BaseAddress", alias = "baseAddress")]
    pub base_address: String,
    /// Request timeout for the configured transport
    #[serde(with = "serde_timespan", alias = "Timeout")]
    pub timeout: Duration,
    /// Headers sent with every request, keyed by lowercase header name
    #[serde(
        alias = "DefaultRequestHeaders",
        alias = "default_request_headers",
        alias = "defaultHeaders"
    )]
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_address: String::new(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: HashMap::new(),
        }
    }
}

impl ClientOptions {
    /// Options with the given base address and default everything else
    pub fn new(base_address: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Fold header names to lowercase
    ///
    /// A name that is not yet lowercase replaces the lowercase entry of the
    /// same header, so the spelling written last wins. Several new spellings
    /// of one name are folded in sorted order.
    pub fn normalize_headers(&mut self) {
        let mut renamed: Vec<(String, String)> = Vec::new();
        self.default_headers.retain(|name, value| {
            if name.bytes().any(|b| b.is_ascii_uppercase()) {
                renamed.push((name.to_ascii_lowercase(), std::mem::take(value)));
                false
            } else {
                true
            }
        });
        renamed.sort();
        self.default_headers.extend(renamed);
    }

    /// Parse options from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut options: Self = serde_yaml::from_str(content)?;
        options.normalize_headers();
        Ok(options)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
