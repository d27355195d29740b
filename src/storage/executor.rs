//! Statement execution.
//!
//! Every storage operation is expressed as a [`Statement`] (SQL text plus typed bind
//! parameters) and handed to a [`SqlExecutor`]. [`PgExecutor`] runs statements on a
//! Postgres pool; tests substitute an executor that records what it was given.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use crate::error_handling::StorageError;

/// A bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// `BIGINT`
    BigInt(i64),
    /// `INTEGER`
    Int(i32),
    /// `TEXT`/`VARCHAR`, also cast to enum types in SQL
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// SQL text with positional (`$1`, `$2`, ...) parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    /// A statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in positional order.
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// Runs statements against a database, one round trip per call.
///
/// Implementations surface driver errors unchanged and never retry.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Runs a statement that returns no rows and reports the affected-row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError>;

    /// Whether the query returns at least one row.
    async fn exists(&self, statement: &Statement) -> Result<bool, StorageError>;

    /// First column of the first row, `None` when there is no row or the value is NULL.
    async fn fetch_i64(&self, statement: &Statement) -> Result<Option<i64>, StorageError>;
}

/// [`SqlExecutor`] backed by a Postgres connection pool.
///
/// Each statement runs on a connection checked out for that statement alone, in
/// autocommit mode; the pool returns the connection on every exit path.
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        PgExecutor { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn build_query(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
    statement
        .params()
        .iter()
        .fold(sqlx::query(statement.sql()), |query, value| match value {
            SqlValue::BigInt(v) => query.bind(*v),
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        })
}

#[async_trait]
impl SqlExecutor for PgExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError> {
        let result = build_query(statement).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, statement: &Statement) -> Result<bool, StorageError> {
        let row = build_query(statement).fetch_optional(&self.pool).await?;
        Ok(row.is_some())
    }

    async fn fetch_i64(&self, statement: &Statement) -> Result<Option<i64>, StorageError> {
        match build_query(statement).fetch_optional(&self.pool).await? {
            Some(row) => Ok(row.try_get::<Option<i64>, _>(0)?),
            None => Ok(None),
        }
    }
}
