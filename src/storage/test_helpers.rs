//! Shared test helpers for storage module tests.
//!
//! [`RecordingExecutor`] stands in for a database connection: it records every
//! statement it is given and answers queries from canned values.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error_handling::StorageError;
use crate::storage::executor::{SqlExecutor, SqlValue, Statement};

/// Executor that records statements instead of running them.
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<Statement>>,
    existing_rows: bool,
    track_catalog: bool,
    created_types: Mutex<HashSet<String>>,
    fetch_value: Option<i64>,
    fail: bool,
}

impl RecordingExecutor {
    /// Empty database: existence checks find nothing, offset queries return no row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every existence check finds a row.
    pub fn with_existing_rows(mut self) -> Self {
        self.existing_rows = true;
        self
    }

    /// `CREATE TYPE` statements are remembered, so later `pg_type` lookups find them.
    pub fn with_catalog(mut self) -> Self {
        self.track_catalog = true;
        self
    }

    /// Single-column queries return `value`.
    pub fn with_fetch_value(mut self, value: i64) -> Self {
        self.fetch_value = Some(value);
        self
    }

    /// Every statement fails after being recorded.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Statements received so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    /// SQL text of the statements received so far.
    pub fn sql(&self) -> Vec<String> {
        self.statements()
            .iter()
            .map(|s| s.sql().to_string())
            .collect()
    }

    fn record(&self, statement: &Statement) -> Result<(), StorageError> {
        self.statements.lock().unwrap().push(statement.clone());
        if self.fail {
            return Err(StorageError::Sql(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError> {
        self.record(statement)?;
        if self.track_catalog {
            if let Some(name) = statement
                .sql()
                .strip_prefix("CREATE TYPE ")
                .and_then(|rest| rest.split_whitespace().next())
            {
                self.created_types.lock().unwrap().insert(name.to_string());
            }
        }
        Ok(1)
    }

    async fn exists(&self, statement: &Statement) -> Result<bool, StorageError> {
        self.record(statement)?;
        if self.existing_rows {
            return Ok(true);
        }
        let created = self.created_types.lock().unwrap();
        Ok(statement.params().iter().any(|param| match param {
            SqlValue::Text(name) => created.contains(name),
            _ => false,
        }))
    }

    async fn fetch_i64(&self, statement: &Statement) -> Result<Option<i64>, StorageError> {
        self.record(statement)?;
        Ok(self.fetch_value)
    }
}
