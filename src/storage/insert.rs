//! Single-row insert of a status record.
//!
//! One statement per record, committed on its own. Replaying an offset that was
//! already stored inserts a second row; callers that care must check
//! [`get_last_offset`](super::get_last_offset) first.

use log::debug;

use crate::config::{MISSING_TIMING, PHRASE_STATUS_TYPE, RESPONSE_STATUS_TYPE};
use crate::error_handling::StorageError;
use crate::record::StatusRecord;
use crate::storage::executor::{SqlExecutor, Statement};
use crate::storage::schema::quote_ident;

/// Whole epoch seconds for the `event_time BIGINT` column.
fn event_time(timestamp: f64) -> i64 {
    timestamp.round() as i64
}

/// Builds the parameterized insert for `record` into its topic table.
///
/// Missing timings are stored as `-1`; status and phrase are cast to their enum types.
pub fn insert_statement(record: &StatusRecord) -> Statement {
    Statement::new(format!(
        "INSERT INTO {} (topic_offset, test_from, url, event_time, status, phrase, dns, response, detail) \
         VALUES ($1, $2, $3, $4, $5::{RESPONSE_STATUS_TYPE}, $6::{PHRASE_STATUS_TYPE}, $7, $8, $9)",
        quote_ident(&record.topic().table_name())
    ))
    .bind(record.offset())
    .bind(record.source())
    .bind(record.url())
    .bind(event_time(record.timestamp()))
    .bind(record.status().as_str())
    .bind(record.phrase().as_str())
    .bind(record.dns_time().unwrap_or(MISSING_TIMING))
    .bind(record.response_time().unwrap_or(MISSING_TIMING))
    .bind(record.detail())
}

/// Inserts `record` as one row of its topic table.
pub async fn insert_status<E>(record: &StatusRecord, executor: &E) -> Result<(), StorageError>
where
    E: SqlExecutor + ?Sized,
{
    executor.execute(&insert_statement(record)).await?;
    debug!(
        "Inserted {} offset {} into {}",
        record.url(),
        record.offset(),
        record.topic().table_name()
    );
    Ok(())
}
