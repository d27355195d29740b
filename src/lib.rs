//! web_status library: website availability status records and their persistence.
//!
//! Probe results are represented as [`StatusRecord`]s, published over an
//! append-only log as MessagePack payloads ([`codec`]) and persisted into
//! per-domain PostgreSQL tables ([`storage`]).
//!
//! # Example
//!
//! ```no_run
//! use web_status::{init_db_pool, DatabaseConfig, Recorder, StatusRepository, Topic};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool(&DatabaseConfig::new("postgres://localhost/web_status")).await?;
//! let recorder = Recorder::new(StatusRepository::from_pool(pool));
//! recorder.prepare().await?;
//!
//! let topic = Topic::new("aiven.io")?;
//! let next = recorder.resume_offset(&topic).await?;
//! println!("resume {topic} at offset {next}");
//! # let payload: Vec<u8> = Vec::new();
//! recorder.record(&payload, next).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Storage operations are async and require a Tokio runtime.

#![warn(missing_docs)]

pub mod codec;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod record;
pub mod recorder;
pub mod storage;

// Re-export public API
pub use codec::{decode, encode};
pub use config::{DatabaseConfig, LogFormat, LogLevel};
pub use error_handling::{CodecError, InitializationError, RecordError, StorageError};
pub use record::{Phrase, Status, StatusRecord, Topic};
pub use recorder::{RecordOutcome, Recorder};
pub use storage::{
    init_db_pool, PgExecutor, SqlExecutor, SqlValue, Statement, StatusRepository, StatusStore,
};
