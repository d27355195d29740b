//! Error type definitions.
//!
//! This module defines the error types used throughout the crate, one per layer:
//! record construction, wire codec, storage and process initialization.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while building a [`StatusRecord`](crate::StatusRecord) or one of its parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The URL could not be parsed at all.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser message
        reason: String,
    },

    /// The URL (or bare domain) has no host usable as a topic.
    #[error("Host '{0}' cannot be used as a topic")]
    InvalidHost(String),

    /// Status text is neither "responsive" nor "unresponsive".
    #[error("Unknown response status: {0}")]
    UnknownStatus(String),

    /// Phrase text is not part of the phrase set.
    #[error("Unknown phrase: {0}")]
    UnknownPhrase(String),
}

/// Errors raised by the MessagePack wire codec.
///
/// A decode failure is fatal to that one message only; consumers log it and move on.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Serialization failed.
    #[error("Failed to encode status record: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// The payload is malformed, truncated, or has unknown or missing keys.
    #[error("Failed to decode status record: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The payload is not a MessagePack map (positional encodings are not accepted).
    #[error("Failed to decode status record: expected a map, found marker {0:#04x}")]
    NotAMap(u8),

    /// A complete record was read but bytes remain after it.
    #[error("Failed to decode status record: {0} trailing byte(s) after payload")]
    TrailingBytes(usize),

    /// The payload decoded but its values do not form a valid record.
    #[error("Failed to decode status record: {0}")]
    Record(#[from] RecordError),
}

/// Error types for database operations.
///
/// Errors from the driver are surfaced unchanged; this layer never retries.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not establish the connection pool.
    #[error("Database connection error: {0}")]
    Connect(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}
