//! Configuration constants.
//!
//! Sentinels, schema object names and database defaults shared by the record model
//! and the storage layer.

use std::time::Duration;

/// Offset of a record the log has not positioned yet.
pub const UNASSIGNED_OFFSET: i64 = -1;
/// Stored in `dns`/`response` when the timing was not measured.
pub const MISSING_TIMING: i32 = -1;

// Schema object names
/// Postgres enum type holding `responsive`/`unresponsive`.
pub const RESPONSE_STATUS_TYPE: &str = "response_status";
/// Postgres enum type holding every phrase.
pub const PHRASE_STATUS_TYPE: &str = "phrase_status";
/// Per-topic table name prefix; the topic is appended.
pub const TABLE_NAME_PREFIX: &str = "web_activity_";
/// Per-topic `url` index name prefix; the topic is appended.
pub const INDEX_NAME_PREFIX: &str = "web_activity_url_index_";
/// Longest identifier Postgres keeps; longer names are silently truncated.
pub const MAX_IDENTIFIER_LEN: usize = 63;

// Database pool defaults
/// Maximum pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// How long to wait for a pooled connection before giving up.
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable consulted for the database URL.
pub const DATABASE_URL_ENV: &str = "WEB_STATUS_DATABASE_URL";
