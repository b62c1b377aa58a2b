//! Validators for external client options

use super::trait_def::Validate;
use super::violations::{FieldViolation, ValidationError};
use crate::config::models::{ClientOptions, MAX_TIMEOUT, MIN_TIMEOUT};
use crate::utils::data::format_timespan;
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Field names reported in violations
pub mod fields {
    pub const BASE_ADDRESS: &str = "base_address";
    pub const TIMEOUT: &str = "timeout";
    pub const DEFAULT_HEADERS: &str = "default_headers";
}

impl Validate for ClientOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        debug!("Validating external client options");

        let mut violations = Vec::new();
        violations.extend(validate_base_address(&self.base_address));
        violations.extend(validate_timeout(self.timeout));
        violations.extend(validate_headers(&self.default_headers));

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Base address must be a non-empty absolute http(s) URL with a host
pub fn validate_base_address(base_address: &str) -> Option<FieldViolation> {
    let violation = |message: String| Some(FieldViolation::new(fields::BASE_ADDRESS, message));

    if base_address.trim().is_empty() {
        return violation("Base address is required".to_string());
    }

    let url = match Url::parse(base_address) {
        Ok(url) => url,
        Err(e) => {
            return violation(format!(
                "'{}' is not a valid absolute URL: {}",
                base_address, e
            ));
        }
    };

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return violation(format!(
                "Base address must use http:// or https:// scheme, got: {}",
                scheme
            ));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return violation(format!("'{}' has no host", base_address));
    }

    None
}

/// Timeout must fall inside the inclusive allowed range
pub fn validate_timeout(timeout: Duration) -> Option<FieldViolation> {
    if timeout < MIN_TIMEOUT || timeout > MAX_TIMEOUT {
        return Some(FieldViolation::new(
            fields::TIMEOUT,
            format!(
                "Timeout {} must be between {} and {}",
                format_timespan(timeout),
                format_timespan(MIN_TIMEOUT),
                format_timespan(MAX_TIMEOUT)
            ),
        ));
    }
    None
}

/// Every default header must be a legal HTTP header name and value, and
/// no name may appear twice in different case
pub fn validate_headers(headers: &HashMap<String, String>) -> Vec<FieldViolation> {
    let mut names: Vec<&String> = headers.keys().collect();
    names.sort();

    let mut violations = Vec::new();
    let mut seen: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let folded = name.to_ascii_lowercase();
        if seen.contains(&folded) {
            violations.push(FieldViolation::new(
                fields::DEFAULT_HEADERS,
                format!("Header '{}' is set more than once with different case", name),
            ));
            continue;
        }
        seen.push(folded);

        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            violations.push(FieldViolation::new(
                fields::DEFAULT_HEADERS,
                format!("'{}' is not a valid header name", name),
            ));
        } else if HeaderValue::from_str(&headers[name]).is_err() {
            violations.push(FieldViolation::new(
                fields::DEFAULT_HEADERS,
                format!("Header '{}' has an invalid value", name),
            ));
        }
    }
    violations
}
