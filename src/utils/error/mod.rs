//! Error handling for external clients
//!
//! This module defines the error type returned by registration, binding,
//! resolution and transport configuration.

mod conversions;
mod helpers;
mod types;

pub use types::{ClientError, Result};
