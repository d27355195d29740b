//! Error handling.
//!
//! Error types are split by layer:
//! - **RecordError**: a status record could not be built (bad URL, unknown status or phrase)
//! - **CodecError**: a wire payload could not be encoded or decoded
//! - **StorageError**: the database rejected a statement or could not be reached
//! - **InitializationError**: process setup (logging) failed
//!
//! There is no "already exists" error: schema bootstrap treats existing objects as a no-op.

mod types;

// Re-export public API
pub use types::{CodecError, InitializationError, RecordError, StorageError};
