//! Registration surface used by host application startup code

use super::factory::create_client;
use super::provider::ClientProvider;
use super::registration::{CapabilityMap, ClientRegistration};
use super::transport::{HttpTransport, Transport};
use crate::config::binding::ConfigurationSource;
use crate::config::models::ClientOptions;
use crate::core::options::{OptionsRegistry, ValidationMode};
use crate::utils::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A client type that names itself and wraps an [`HttpTransport`]
///
/// ```
/// use external_clients::{ExternalClient, HttpTransport};
///
/// struct BillingClient {
///     http: HttpTransport,
/// }
///
/// impl ExternalClient for BillingClient {
///     const NAME: &'static str = "BillingClient";
///
///     fn from_transport(http: HttpTransport) -> Self {
///         Self { http }
///     }
/// }
/// ```
pub trait ExternalClient: Send + Sync + 'static {
    /// Options and registration key
    const NAME: &'static str;

    fn from_transport(transport: HttpTransport) -> Self;
}

/// Collects options and client registrations, then freezes them
///
/// Registrations for the same name compose: every mutator is kept and runs
/// in order on resolution.
pub struct ClientRegistryBuilder {
    options: OptionsRegistry,
    clients: CapabilityMap,
    mode: ValidationMode,
}

impl ClientRegistryBuilder {
    pub fn new() -> Self {
        Self {
            options: OptionsRegistry::new(),
            clients: CapabilityMap::default(),
            mode: ValidationMode::default(),
        }
    }

    /// Choose between startup and first-use validation
    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add an options mutator for `name` without registering a client
    pub fn configure<F>(mut self, name: impl Into<String>, mutator: F) -> Self
    where
        F: Fn(&mut ClientOptions) + Send + Sync + 'static,
    {
        self.options.register(name, mutator);
        self
    }

    /// Bind the options of `name` to the section of the same name in `source`
    pub fn bind(mut self, name: impl Into<String>, source: Arc<dyn ConfigurationSource>) -> Self {
        self.options.bind(name, source);
        self
    }

    /// Register a client for capability `C` configured by `mutator`
    pub fn add_client<C, T, M, F, B>(
        self,
        name: impl Into<String>,
        mutator: M,
        transport_factory: F,
        constructor: B,
    ) -> Self
    where
        C: ?Sized + 'static,
        T: Transport + 'static,
        M: Fn(&mut ClientOptions) + Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        B: Fn(T) -> Arc<C> + Send + Sync + 'static,
    {
        let name = name.into();
        self.configure(name.clone(), mutator)
            .register_client::<C, T, F, B>(name, transport_factory, constructor)
    }

    /// Register a client for capability `C` bound to configuration section `name`
    pub fn add_client_from_config<C, T, F, B>(
        self,
        name: impl Into<String>,
        source: Arc<dyn ConfigurationSource>,
        transport_factory: F,
        constructor: B,
    ) -> Self
    where
        C: ?Sized + 'static,
        T: Transport + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        B: Fn(T) -> Arc<C> + Send + Sync + 'static,
    {
        let name = name.into();
        self.bind(name.clone(), source)
            .register_client::<C, T, F, B>(name, transport_factory, constructor)
    }

    /// [`add_client`](Self::add_client) with the default [`HttpTransport`]
    pub fn add_http_client<C, M, B>(
        self,
        name: impl Into<String>,
        mutator: M,
        constructor: B,
    ) -> Self
    where
        C: ?Sized + 'static,
        M: Fn(&mut ClientOptions) + Send + Sync + 'static,
        B: Fn(HttpTransport) -> Arc<C> + Send + Sync + 'static,
    {
        self.add_client::<C, _, _, _, _>(name, mutator, HttpTransport::new, constructor)
    }

    /// [`add_client_from_config`](Self::add_client_from_config) with the default [`HttpTransport`]
    pub fn add_http_client_from_config<C, B>(
        self,
        name: impl Into<String>,
        source: Arc<dyn ConfigurationSource>,
        constructor: B,
    ) -> Self
    where
        C: ?Sized + 'static,
        B: Fn(HttpTransport) -> Arc<C> + Send + Sync + 'static,
    {
        self.add_client_from_config::<C, _, _, _>(name, source, HttpTransport::new, constructor)
    }

    /// Register `I` under [`ExternalClient::NAME`] as its own capability
    pub fn add_external_client<I, M>(self, mutator: M) -> Self
    where
        I: ExternalClient,
        M: Fn(&mut ClientOptions) + Send + Sync + 'static,
    {
        self.add_http_client::<I, _, _>(I::NAME, mutator, |t| Arc::new(I::from_transport(t)))
    }

    /// Register `I` bound to the configuration section named [`ExternalClient::NAME`]
    pub fn add_external_client_from_config<I>(self, source: Arc<dyn ConfigurationSource>) -> Self
    where
        I: ExternalClient,
    {
        self.add_http_client_from_config::<I, _>(I::NAME, source, |t| {
            Arc::new(I::from_transport(t))
        })
    }

    /// Options registered so far
    pub fn options(&self) -> &OptionsRegistry {
        &self.options
    }

    /// Freeze every registration into a [`ClientProvider`]
    ///
    /// With [`ValidationMode::OnStart`] this fails when any registered name
    /// has invalid options, listing all of them.
    pub fn build(self) -> Result<ClientProvider> {
        let snapshot = self.options.freeze(self.mode);

        if self.mode == ValidationMode::OnStart {
            snapshot.validate_all()?;
        }

        info!(
            clients = snapshot.len(),
            mode = ?self.mode,
            "External client registry built"
        );
        Ok(ClientProvider::new(snapshot, self.clients))
    }

    fn register_client<C, T, F, B>(
        mut self,
        name: String,
        transport_factory: F,
        constructor: B,
    ) -> Self
    where
        C: ?Sized + 'static,
        T: Transport + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        B: Fn(T) -> Arc<C> + Send + Sync + 'static,
    {
        debug!(
            client = %name,
            capability = std::any::type_name::<C>(),
            "Registered external client"
        );

        let client_name = name.clone();
        self.clients.insert(ClientRegistration::<C>::new(name, move |snapshot| {
            let transport = create_client::<T, _>(snapshot, &client_name, &transport_factory)?;
            Ok(constructor(transport))
        }));
        self
    }
}

impl Default for ClientRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistryBuilder")
            .field("options", &self.options)
            .field("capabilities", &self.clients.summary())
            .field("mode", &self.mode)
            .finish()
    }
}
