//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON output)
//! - Database connection pool
//!
//! All initialization functions return proper error types for error handling.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
pub use crate::storage::init_db_pool;
