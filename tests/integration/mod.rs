//! Integration tests for external-clients
//!
//! These tests exercise registration, binding and resolution together
//! through the public API.

pub mod client_registration_tests;
pub mod transport_tests;
