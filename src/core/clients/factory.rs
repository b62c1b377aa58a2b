//! Applying resolved options to transports

use super::transport::Transport;
use crate::config::models::ClientOptions;
use crate::core::options::OptionsSnapshot;
use crate::utils::error::{ClientError, Result};
use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

impl ClientOptions {
    /// Configure `transport` with these options
    ///
    /// Values are copied; later changes to `self` do not reach the
    /// transport. Nothing is applied when any value is rejected, including
    /// a header name present twice in different case.
    pub fn apply_to<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<()> {
        let base_address = Url::parse(&self.base_address).map_err(|e| {
            ClientError::invalid_url(format!("'{}': {}", self.base_address, e))
        })?;

        let mut headers: Vec<(HeaderName, HeaderValue)> =
            Vec::with_capacity(self.default_headers.len());
        for (name, value) in &self.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::invalid_header(name, e.to_string()))?;
            if headers.iter().any(|(existing, _)| *existing == header_name) {
                return Err(ClientError::invalid_header(
                    name,
                    "set more than once with different case",
                ));
            }
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::invalid_header(name, e.to_string()))?;
            headers.push((header_name, header_value));
        }

        transport.set_base_address(base_address);
        transport.set_timeout(self.timeout);
        for (name, value) in headers {
            transport.insert_default_header(name, value);
        }
        Ok(())
    }
}

/// Build a transport for `name` configured with its validated options
///
/// `transport_factory` is not called when the options are invalid.
pub fn create_client<T, F>(
    snapshot: &OptionsSnapshot,
    name: &str,
    transport_factory: F,
) -> Result<T>
where
    T: Transport,
    F: FnOnce() -> T,
{
    let options = snapshot.get(name)?;
    let mut transport = transport_factory();
    options.apply_to(&mut transport)?;
    debug!(client = name, "Created external client transport");
    Ok(transport)
}
