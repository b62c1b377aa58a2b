//! Resolution of configured clients

use super::factory::create_client;
use super::registration::CapabilityMap;
use super::transport::{HttpTransport, Transport};
use crate::config::models::ClientOptions;
use crate::core::options::{OptionsSnapshot, ValidationMode};
use crate::utils::error::{ClientError, Result};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// Frozen client registry
///
/// Each call builds a fresh transport from the cached, validated options
/// and hands it to the registered constructor. Safe to share across
/// threads.
pub struct ClientProvider {
    options: OptionsSnapshot,
    clients: CapabilityMap,
}

impl ClientProvider {
    pub(crate) fn new(options: OptionsSnapshot, clients: CapabilityMap) -> Self {
        Self { options, clients }
    }

    /// The client for the last distinct name registered for capability `C`
    ///
    /// Registering a name again replaces its constructor but keeps its
    /// position, so it does not become the one returned here.
    pub fn get<C: ?Sized + 'static>(&self) -> Result<Arc<C>> {
        self.clients
            .get::<C>()
            .last()
            .ok_or(ClientError::UnregisteredCapability(type_name::<C>()))?
            .build(&self.options)
    }

    /// The client registered as `name` for capability `C`
    pub fn get_named<C: ?Sized + 'static>(&self, name: &str) -> Result<Arc<C>> {
        self.clients
            .get::<C>()
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ClientError::unresolved(name))?
            .build(&self.options)
    }

    /// Every client registered for capability `C`, in registration order
    pub fn get_all<C: ?Sized + 'static>(&self) -> Result<Vec<Arc<C>>> {
        self.clients
            .get::<C>()
            .iter()
            .map(|r| r.build(&self.options))
            .collect()
    }

    /// Names of the clients registered for capability `C`
    pub fn client_names<C: ?Sized + 'static>(&self) -> Vec<&str> {
        self.clients.names::<C>().iter().map(String::as_str).collect()
    }

    /// Validated options for `name`
    pub fn options(&self, name: &str) -> Result<Arc<ClientOptions>> {
        self.options.get(name)
    }

    /// A transport of the caller's choosing configured for `name`
    pub fn create_client<T, F>(&self, name: &str, transport_factory: F) -> Result<T>
    where
        T: Transport,
        F: FnOnce() -> T,
    {
        create_client(&self.options, name, transport_factory)
    }

    /// A default [`HttpTransport`] configured for `name`
    pub fn create_transport(&self, name: &str) -> Result<HttpTransport> {
        self.create_client(name, HttpTransport::new)
    }

    pub fn snapshot(&self) -> &OptionsSnapshot {
        &self.options
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.options.mode()
    }
}

impl fmt::Debug for ClientProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientProvider")
            .field("options", &self.options)
            .field("capabilities", &self.clients.summary())
            .finish()
    }
}
