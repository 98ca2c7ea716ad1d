//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, limits, default file names)
//! - CLI option types and the library `Config`

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
