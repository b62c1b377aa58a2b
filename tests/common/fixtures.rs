//! Client types used across integration tests
//!
//! Each type wraps the transport it was constructed with, the way a host
//! application's typed client would.

use external_clients::{ExternalClient, HttpTransport};

macro_rules! typed_client {
    ($name:ident) => {
        pub struct $name {
            pub http: HttpTransport,
        }

        impl ExternalClient for $name {
            const NAME: &'static str = stringify!($name);

            fn from_transport(http: HttpTransport) -> Self {
                Self { http }
            }
        }
    };
}

typed_client!(ActionTestClient);
typed_client!(ConfigTestClient);
typed_client!(MultiRegistrationClient);
typed_client!(DiffClient1);
typed_client!(DiffClient2);

/// Capability shared by several implementations
pub trait CommonClient: Send + Sync {
    fn http(&self) -> &HttpTransport;
    fn kind(&self) -> &'static str;
}

pub struct CommonClientA(pub HttpTransport);
pub struct CommonClientB(pub HttpTransport);

impl CommonClient for CommonClientA {
    fn http(&self) -> &HttpTransport {
        &self.0
    }

    fn kind(&self) -> &'static str {
        "A"
    }
}

impl CommonClient for CommonClientB {
    fn http(&self) -> &HttpTransport {
        &self.0
    }

    fn kind(&self) -> &'static str {
        "B"
    }
}
