//! Client factory binding
//!
//! Associates client names and capability types with a transport factory
//! and a constructor. Resolved options are applied to a freshly built
//! transport every time a client is requested.
//!
//! ```
//! use external_clients::{ClientRegistryBuilder, HttpTransport};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct Svc(HttpTransport);
//!
//! let provider = ClientRegistryBuilder::new()
//!     .add_http_client("Svc", |o| {
//!         o.base_address = "http://x.test".to_string();
//!         o.timeout = Duration::from_secs(5);
//!     }, |t| Arc::new(Svc(t)))
//!     .build()
//!     .unwrap();
//!
//! let svc = provider.get::<Svc>().unwrap();
//! assert_eq!(svc.0.timeout(), Some(Duration::from_secs(5)));
//! ```

mod builder;
mod factory;
mod provider;
mod registration;
mod transport;

pub use builder::{ClientRegistryBuilder, ExternalClient};
pub use factory::create_client;
pub use provider::ClientProvider;
pub use transport::{DEFAULT_USER_AGENT, HttpTransport, Transport};
