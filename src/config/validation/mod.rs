//! Configuration validation
//!
//! Validators collect every violation instead of stopping at the first one,
//! so a misconfigured client reports all of its bad fields in one error.
//!
//! - `trait_def`: Core Validate trait definition
//! - `violations`: `FieldViolation` and the aggregated `ValidationError`
//! - `client_validators`: Validators for `ClientOptions`

mod client_validators;
mod trait_def;
mod violations;

pub use client_validators::{fields, validate_base_address, validate_headers, validate_timeout};
pub use trait_def::Validate;
pub use violations::{FieldViolation, ValidationError};
