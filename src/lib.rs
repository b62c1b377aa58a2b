//! # external-clients
//!
//! Register named HTTP client wrappers with per-client options (base
//! address, timeout, default headers). Options are composed from
//! configuration sections and in-process mutators, validated at startup, and
//! applied to a fresh transport whenever a client is requested.
//!
//! ## Quick Start
//!
//! ```rust
//! use external_clients::{ClientRegistryBuilder, ExternalClient, HttpTransport};
//! use std::time::Duration;
//!
//! struct WeatherClient {
//!     http: HttpTransport,
//! }
//!
//! impl ExternalClient for WeatherClient {
//!     const NAME: &'static str = "WeatherClient";
//!
//!     fn from_transport(http: HttpTransport) -> Self {
//!         Self { http }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ClientRegistryBuilder::new()
//!         .add_external_client::<WeatherClient, _>(|o| {
//!             o.base_address = "https://weather.example.com".to_string();
//!             o.timeout = Duration::from_secs(5);
//!         })
//!         .build()?;
//!
//!     let weather = provider.get::<WeatherClient>()?;
//!     assert_eq!(weather.http.timeout(), Some(Duration::from_secs(5)));
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration Binding
//!
//! ```rust,no_run
//! use external_clients::{ClientRegistryBuilder, ConfigurationLoader, HttpTransport};
//! use std::sync::Arc;
//!
//! # fn main() -> external_clients::Result<()> {
//! let config = Arc::new(
//!     ConfigurationLoader::new()
//!         .add_file("config/clients.yaml")
//!         .with_env_prefix("APP")
//!         .build()?,
//! );
//!
//! let provider = ClientRegistryBuilder::new()
//!     .add_http_client_from_config("Payments", config, Arc::new)
//!     .build()?;
//!
//! let _payments: Arc<HttpTransport> = provider.get()?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use crate::config::{
    ClientOptions, ConfigSection, ConfigurationLoader, ConfigurationSource, FieldViolation,
    InMemoryConfiguration, Validate, ValidationError,
};
pub use crate::core::clients::{
    ClientProvider, ClientRegistryBuilder, ExternalClient, HttpTransport, Transport, create_client,
};
pub use crate::core::options::{OptionsRegistry, OptionsSnapshot, ValidationMode};
pub use crate::utils::error::{ClientError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
