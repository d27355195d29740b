//! Repository interface for status persistence.
//!
//! Callers depend on [`StatusStore`] rather than on a database connection, so the
//! consuming side can be exercised without Postgres.

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::error_handling::StorageError;
use crate::record::{StatusRecord, Topic};
use crate::storage::executor::{PgExecutor, SqlExecutor};
use crate::storage::{create_table_schema, create_type_schema, get_last_offset, insert_status};

/// Persistence operations needed to record status messages.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Creates the shared enum types if missing.
    async fn ensure_types(&self) -> Result<(), StorageError>;

    /// Creates the topic's table and index if missing.
    async fn ensure_table(&self, topic: &Topic) -> Result<(), StorageError>;

    /// Offset of the topic's newest row, `-1` when empty.
    async fn last_offset(&self, topic: &Topic) -> Result<i64, StorageError>;

    /// Inserts one record as one row.
    async fn insert(&self, record: &StatusRecord) -> Result<(), StorageError>;
}

/// [`StatusStore`] that runs the schema, offset and insert statements on an executor.
#[derive(Debug, Clone)]
pub struct StatusRepository<E> {
    executor: E,
}

impl<E: SqlExecutor> StatusRepository<E> {
    /// Repository over `executor`.
    pub fn new(executor: E) -> Self {
        StatusRepository { executor }
    }

    /// The executor statements are sent to.
    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl StatusRepository<PgExecutor> {
    /// Repository over a Postgres pool.
    pub fn from_pool(pool: PgPool) -> Self {
        StatusRepository::new(PgExecutor::new(pool))
    }
}

#[async_trait]
impl<E: SqlExecutor> StatusStore for StatusRepository<E> {
    async fn ensure_types(&self) -> Result<(), StorageError> {
        create_type_schema(&self.executor).await
    }

    async fn ensure_table(&self, topic: &Topic) -> Result<(), StorageError> {
        create_table_schema(topic, &self.executor).await
    }

    async fn last_offset(&self, topic: &Topic) -> Result<i64, StorageError> {
        get_last_offset(topic, &self.executor).await
    }

    async fn insert(&self, record: &StatusRecord) -> Result<(), StorageError> {
        insert_status(record, &self.executor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Phrase, Status};
    use crate::storage::test_helpers::RecordingExecutor;
    use crate::storage::{
        create_table_statement, insert_statement, last_offset_statement, type_exists_statement,
    };

    #[tokio::test]
    async fn test_repository_delegates_each_operation() {
        let repository = StatusRepository::new(RecordingExecutor::new().with_existing_rows());
        let topic = Topic::new("aiven.io").unwrap();
        let record = StatusRecord::new("sydney", "https://aiven.io", Status::Responsive, Phrase::Ok)
            .unwrap()
            .with_offset(3);

        repository.ensure_types().await.unwrap();
        repository.ensure_table(&topic).await.unwrap();
        assert_eq!(repository.last_offset(&topic).await.unwrap(), -1);
        repository.insert(&record).await.unwrap();

        let statements = repository.executor().statements();
        assert_eq!(statements.len(), 6);
        assert_eq!(statements[0], type_exists_statement("response_status"));
        assert_eq!(statements[2], create_table_statement(&topic));
        assert_eq!(statements[4], last_offset_statement(&topic));
        assert_eq!(statements[5], insert_statement(&record));
    }

    #[tokio::test]
    async fn test_repository_usable_as_trait_object() {
        let store: Box<dyn StatusStore> =
            Box::new(StatusRepository::new(RecordingExecutor::new().with_fetch_value(41)));
        let topic = Topic::new("example.com").unwrap();
        assert_eq!(store.last_offset(&topic).await.unwrap(), 41);
    }
}
