//! Validation trait definition

use super::violations::ValidationError;

/// Validation trait for configuration structures
pub trait Validate {
    /// Check every rule, reporting all violations at once
    fn validate(&self) -> Result<(), ValidationError>;
}
