//! Named options pipeline
//!
//! [`OptionsRegistry`] collects registrations while the host application
//! starts; [`OptionsRegistry::freeze`] turns it into an [`OptionsSnapshot`]
//! that resolves and validates each name once and can be shared across
//! threads.

mod registry;
mod snapshot;

pub use registry::{Mutator, NamedOptionsEntry, OptionsRegistry};
pub use snapshot::{OptionsSnapshot, ValidationMode};
