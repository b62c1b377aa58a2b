//! Transport collaborator
//!
//! The options pipeline never performs requests itself. It configures a
//! [`Transport`] supplied by the caller: sets the base address and timeout
//! and installs the default headers.

use crate::utils::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use std::time::Duration;
use url::Url;

/// User agent sent when no default header overrides it
pub const DEFAULT_USER_AGENT: &str = concat!("external-clients/", env!("CARGO_PKG_VERSION"));

/// An HTTP client endpoint that options can be applied to
pub trait Transport {
    fn set_base_address(&mut self, base_address: Url);

    fn set_timeout(&mut self, timeout: Duration);

    /// Install a header sent with every request, replacing one of the same name
    fn insert_default_header(&mut self, name: HeaderName, value: HeaderValue);
}

/// Default transport backed by `reqwest`
///
/// Holds the applied configuration and builds a [`reqwest::Client`] from it
/// on demand.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    base_address: Option<Url>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_address(&self) -> Option<&Url> {
        self.base_address.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Resolve `path` against the base address
    ///
    /// Follows URL reference resolution: without a trailing slash the last
    /// segment of the base address is replaced.
    pub fn url(&self, path: &str) -> Result<Url> {
        match &self.base_address {
            Some(base) => Ok(base.join(path)?),
            None => Url::parse(path).map_err(|e| {
                ClientError::invalid_url(format!(
                    "'{}' is relative and no base address is set: {}",
                    path, e
                ))
            }),
        }
    }

    /// Build a `reqwest::Client` carrying the timeout and default headers
    pub fn client(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(self.default_headers.clone());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }

    /// Start a request to `path` relative to the base address
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self.client()?.request(method, url))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }
}

impl Transport for HttpTransport {
    fn set_base_address(&mut self, base_address: Url) {
        self.base_address = Some(base_address);
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    fn insert_default_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.default_headers.insert(name, value);
    }
}
