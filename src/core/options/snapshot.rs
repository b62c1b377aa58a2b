//! Frozen, validated view of the options registry

use super::registry::NamedOptionsEntry;
use crate::config::models::ClientOptions;
use crate::config::validation::{Validate, ValidationError};
use crate::utils::data::Timespan;
use crate::utils::error::{ClientError, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// When options are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Every registered name is validated while the provider is built
    #[default]
    OnStart,
    /// Each name is validated the first time it is resolved
    OnFirstUse,
}

/// Cached outcome of resolving one name
#[derive(Debug, Clone)]
enum ResolveFailure {
    Validation(ValidationError),
    Config(String),
}

impl From<ResolveFailure> for ClientError {
    fn from(failure: ResolveFailure) -> Self {
        match failure {
            ResolveFailure::Validation(err) => ClientError::Validation(err),
            ResolveFailure::Config(message) => ClientError::Config(message),
        }
    }
}

struct SnapshotEntry {
    entry: NamedOptionsEntry,
    resolved: OnceCell<std::result::Result<Arc<ClientOptions>, ResolveFailure>>,
}

/// Immutable per-name options, each resolved and validated at most once
pub struct OptionsSnapshot {
    entries: HashMap<String, SnapshotEntry>,
    order: Vec<String>,
    mode: ValidationMode,
}

impl OptionsSnapshot {
    pub(crate) fn new(
        entries: HashMap<String, NamedOptionsEntry>,
        order: Vec<String>,
        mode: ValidationMode,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, entry)| {
                let slot = SnapshotEntry {
                    entry,
                    resolved: OnceCell::new(),
                };
                (name, slot)
            })
            .collect();

        Self {
            entries,
            order,
            mode,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validated options for `name`
    pub fn get(&self, name: &str) -> Result<Arc<ClientOptions>> {
        let slot = self
            .entries
            .get(name)
            .ok_or_else(|| ClientError::unresolved(name))?;

        slot.resolved
            .get_or_init(|| Self::resolve_slot(name, &slot.entry, self.mode))
            .clone()
            .map_err(ClientError::from)
    }

    /// Resolve and validate every name, collecting all failures
    pub fn validate_all(&self) -> Result<()> {
        let failures: Vec<ClientError> = self
            .order
            .iter()
            .filter_map(|name| self.get(name).err())
            .collect();

        if failures.is_empty() {
            info!(clients = self.order.len(), "External client options validated");
            Ok(())
        } else {
            Err(ClientError::Startup(failures))
        }
    }

    /// Names in first-registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
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

    fn resolve_slot(
        name: &str,
        entry: &NamedOptionsEntry,
        mode: ValidationMode,
    ) -> std::result::Result<Arc<ClientOptions>, ResolveFailure> {
        let options = entry.resolve(name).map_err(|e| match e {
            ClientError::Config(message) => ResolveFailure::Config(message),
            other => ResolveFailure::Config(other.to_string()),
        })?;

        if let Err(err) = options.validate() {
            let err = err.for_client(name);
            if mode == ValidationMode::OnFirstUse {
                warn!(client = name, error = %err, "External client options are invalid");
            }
            return Err(ResolveFailure::Validation(err));
        }

        debug!(
            client = name,
            base_address = %options.base_address,
            timeout = %Timespan(options.timeout),
            headers = options.default_headers.len(),
            "Resolved external client options"
        );
        Ok(Arc::new(options))
    }
}

impl fmt::Debug for OptionsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsSnapshot")
            .field("mode", &self.mode)
            .field("clients", &self.order)
            .finish()
    }
}
