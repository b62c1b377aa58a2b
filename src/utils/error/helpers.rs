//! Helper functions for creating specific error types

use super::types::ClientError;
use crate::config::validation::ValidationError;

/// Helper functions for creating specific errors
impl ClientError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unresolved<S: Into<String>>(name: S) -> Self {
        Self::UnresolvedName(name.into())
    }

    pub fn invalid_url<S: Into<String>>(message: S) -> Self {
        Self::InvalidUrl(message.into())
    }

    pub fn invalid_header<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// The validation failure carried by this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Names of the clients that failed validation, across startup failures
    pub fn failed_clients(&self) -> Vec<&str> {
        match self {
            Self::Validation(err) => err.client().into_iter().collect(),
            Self::Startup(errors) => errors.iter().flat_map(|e| e.failed_clients()).collect(),
            _ => Vec::new(),
        }
    }
}
