//! Configuration models

pub mod client;

pub use client::{ClientOptions, DEFAULT_TIMEOUT, MAX_TIMEOUT, MIN_TIMEOUT};
