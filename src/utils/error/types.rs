//! Error types for external clients

use crate::config::validation::ValidationError;
use thiserror::Error;

/// Result type alias for external clients
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for external clients
#[derive(Error, Debug)]
pub enum ClientError {
    /// Resolved options failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Eager validation found one or more misconfigured clients
    #[error("{} external client(s) failed startup validation: {}", .0.len(), join_errors(.0))]
    Startup(Vec<ClientError>),

    /// A client name was requested that was never registered
    #[error("No external client options registered under name '{0}'")]
    UnresolvedName(String),

    /// No client implementation was registered for a capability
    #[error("No external client registered for capability {0}")]
    UnregisteredCapability(&'static str),

    /// Configuration source or binding errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Base address could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Default header name or value rejected by the transport
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_errors(errors: &[ClientError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
