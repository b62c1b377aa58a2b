//! Named options registry
//!
//! Each client name owns an ordered list of mutators and at most one
//! configuration binding. Resolution starts from field defaults, binds the
//! configuration section, then runs the mutators in registration order.

use super::snapshot::{OptionsSnapshot, ValidationMode};
use crate::config::binding::ConfigurationSource;
use crate::config::models::ClientOptions;
use crate::config::validation::{Validate, ValidationError};
use crate::utils::error::{ClientError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Caller-supplied adjustment to a subset of option fields
pub type Mutator = Arc<dyn Fn(&mut ClientOptions) + Send + Sync>;

/// Everything registered under one client name
#[derive(Clone, Default)]
pub struct NamedOptionsEntry {
    binding: Option<Arc<dyn ConfigurationSource>>,
    mutators: Vec<Mutator>,
}

impl NamedOptionsEntry {
    pub fn mutator_count(&self) -> usize {
        self.mutators.len()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Produce the merged options for `name` without validating them
    ///
    /// Header names are folded to lowercase after every step, so a header
    /// is overridden by a later step whatever its spelling.
    pub fn resolve(&self, name: &str) -> Result<ClientOptions> {
        let mut options = ClientOptions::default();

        if let Some(source) = &self.binding {
            if let Some(section) = source.section(name)? {
                section.bind(&mut options)?;
            } else {
                debug!(client = name, "No configuration section found, using defaults");
            }
        }

        for mutator in &self.mutators {
            mutator(&mut options);
            options.normalize_headers();
        }

        Ok(options)
    }
}

impl fmt::Debug for NamedOptionsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedOptionsEntry")
            .field("bound", &self.is_bound())
            .field("mutators", &self.mutators.len())
            .finish()
    }
}

/// Registration-time map from client name to its options entry
#[derive(Clone, Default)]
pub struct OptionsRegistry {
    entries: HashMap<String, NamedOptionsEntry>,
    order: Vec<String>,
}

impl OptionsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutator to the list for `name`
    pub fn register<F>(&mut self, name: impl Into<String>, mutator: F)
    where
        F: Fn(&mut ClientOptions) + Send + Sync + 'static,
    {
        let name = name.into();
        let entry = self.entry(&name);
        entry.mutators.push(Arc::new(mutator));
        debug!(
            client = %name,
            mutators = entry.mutators.len(),
            "Registered options mutator"
        );
    }

    /// Source the base record of `name` from `source`
    ///
    /// A second binding for the same name replaces the first.
    pub fn bind(&mut self, name: impl Into<String>, source: Arc<dyn ConfigurationSource>) {
        let name = name.into();
        self.entry(&name).binding = Some(source);
        debug!(client = %name, "Bound options to configuration source");
    }

    /// Merged, unvalidated options for `name`
    pub fn resolve(&self, name: &str) -> Result<ClientOptions> {
        self.entries
            .get(name)
            .ok_or_else(|| ClientError::unresolved(name))?
            .resolve(name)
    }

    /// Check `options` against every rule
    pub fn validate(options: &ClientOptions) -> std::result::Result<(), ValidationError> {
        options.validate()
    }

    /// Resolve then validate, tagging failures with the client name
    pub fn resolve_validated(&self, name: &str) -> Result<ClientOptions> {
        let options = self.resolve(name)?;
        Self::validate(&options).map_err(|e| e.for_client(name))?;
        Ok(options)
    }

    /// Validate every registered name, reporting every failure
    pub fn validate_all(&self) -> Result<()> {
        let failures: Vec<ClientError> = self
            .names()
            .filter_map(|name| self.resolve_validated(name).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Startup(failures))
        }
    }

    /// Registered names in first-registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&NamedOptionsEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into an immutable snapshot
    pub fn freeze(self, mode: ValidationMode) -> OptionsSnapshot {
        OptionsSnapshot::new(self.entries, self.order, mode)
    }

    fn entry(&mut self, name: &str) -> &mut NamedOptionsEntry {
        if !self.entries.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.entries.entry(name.to_string()).or_default()
    }
}

impl fmt::Debug for OptionsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsRegistry")
            .field("client_count", &self.entries.len())
            .field("clients", &self.order)
            .finish()
    }
}
