//! Resume-position recovery.

use crate::config::UNASSIGNED_OFFSET;
use crate::error_handling::StorageError;
use crate::record::Topic;
use crate::storage::executor::{SqlExecutor, Statement};
use crate::storage::schema::quote_ident;

/// Offset of the most recently inserted row.
///
/// Rows are ordered by the surrogate id, not by event time: probes from different
/// locations reach the log out of event-time order.
pub fn last_offset_statement(topic: &Topic) -> Statement {
    Statement::new(format!(
        "SELECT topic_offset FROM {} ORDER BY id DESC LIMIT 1",
        quote_ident(&topic.table_name())
    ))
}

/// Returns the log offset stored in the topic's newest row, or `-1` for an empty table.
pub async fn get_last_offset<E>(topic: &Topic, executor: &E) -> Result<i64, StorageError>
where
    E: SqlExecutor + ?Sized,
{
    let offset = executor.fetch_i64(&last_offset_statement(topic)).await?;
    Ok(offset.unwrap_or(UNASSIGNED_OFFSET))
}
