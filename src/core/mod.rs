//! Core functionality for external clients
//!
//! - `options`: the named options registry and its frozen snapshot
//! - `clients`: client registration, transports and resolution

pub mod clients;
pub mod options;
