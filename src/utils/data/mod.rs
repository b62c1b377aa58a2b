//! Data processing utilities

pub mod timespan;

pub use timespan::{Timespan, format_timespan, parse_timespan};
