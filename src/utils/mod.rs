//! Utility modules for external clients
//!
//! - **data**: Time-span parsing and formatting
//! - **error**: Error type and result alias
//! - **logging**: Subscriber setup for host applications

pub mod data;
pub mod error;
pub mod logging;

pub use error::{ClientError, Result};
pub use logging::{LogFormat, init_logging};
