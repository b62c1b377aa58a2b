//! Binding client options from external configuration
//!
//! A [`ConfigurationSource`] hands out one [`ConfigSection`] per client
//! name. The section is bound field by field onto the options record, so
//! keys that are absent leave the prior value in place.
//!
//! Recognized keys (matched case-insensitively, `_` ignored):
//! - `BaseAddress`
//! - `Timeout`, a time-span string such as `"00:00:05"` or `"5s"`
//! - `DefaultRequestHeaders:<Header-Name>`

mod layered;
mod memory;
mod section;

pub use layered::ConfigurationLoader;
pub use memory::InMemoryConfiguration;
pub use section::{ConfigSection, KEY_DELIMITER};

use crate::utils::error::Result;

/// Key/value hierarchy that can supply a section per client name
pub trait ConfigurationSource: Send + Sync {
    /// The section named `name`, or `None` when the source has no such section
    fn section(&self, name: &str) -> Result<Option<ConfigSection>>;
}
