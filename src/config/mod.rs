//! Configuration for external clients
//!
//! This module holds the per-client options record, its validation rules and
//! the binding of options from external configuration sources.

pub mod binding;
pub mod models;
pub mod validation;

pub use binding::{ConfigSection, ConfigurationLoader, ConfigurationSource, InMemoryConfiguration};
pub use models::*;
pub use validation::{FieldViolation, Validate, ValidationError};
