//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (sentinels, schema names, pool limits)
//! - Database configuration for library use
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, DatabaseConfig, LogFormat, LogLevel};
