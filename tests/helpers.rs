// Shared test helpers for storage setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use web_status::{
    encode, init_db_pool, DatabaseConfig, Phrase, SqlExecutor, Statement, Status, StatusRecord,
    StorageError,
};

/// Environment variable naming a disposable Postgres database for `#[ignore]` tests.
#[allow(dead_code)] // Used by other test files
pub const TEST_DATABASE_URL_ENV: &str = "WEB_STATUS_TEST_DATABASE_URL";

/// Executor that keeps every statement and reports an empty database.
#[allow(dead_code)] // Used by other test files
#[derive(Default)]
pub struct MemoryExecutor {
    statements: Mutex<Vec<Statement>>,
}

#[allow(dead_code)] // Used by other test files
impl MemoryExecutor {
    pub fn sql(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.sql().to_string())
            .collect()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlExecutor for MemoryExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(1)
    }

    async fn exists(&self, statement: &Statement) -> Result<bool, StorageError> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(false)
    }

    async fn fetch_i64(&self, statement: &Statement) -> Result<Option<i64>, StorageError> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(None)
    }
}

/// Creates a test status record for `url` with typical probe timings.
#[allow(dead_code)] // Used by other test files
pub fn create_test_record(url: &str, phrase: Phrase) -> StatusRecord {
    let status = if phrase.is_custom() {
        Status::Unresponsive
    } else {
        Status::Responsive
    };
    StatusRecord::new("sydney", url, status, phrase)
        .expect("Failed to build test record")
        .with_dns_time(12)
        .with_response_time(240)
}

/// Writes the encoded record to `dir/name` and returns the path.
#[allow(dead_code)] // Used by other test files
pub fn write_payload_file(dir: &Path, name: &str, record: &StatusRecord) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode(record).expect("Failed to encode record"))
        .expect("Failed to write payload file");
    path
}

/// Connects to the database named by [`TEST_DATABASE_URL_ENV`], or returns `None`
/// when it is not set.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> Option<PgPool> {
    let url = std::env::var(TEST_DATABASE_URL_ENV).ok()?;
    Some(
        init_db_pool(&DatabaseConfig::new(url))
            .await
            .expect("Failed to create test database pool"),
    )
}
