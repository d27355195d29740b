//! Idempotent schema bootstrap.
//!
//! Two enum types are shared by every topic table:
//! - `response_status`: `responsive`, `unresponsive`
//! - `phrase_status`: every [`Phrase`], in declaration order
//!
//! Postgres has no `CREATE TYPE IF NOT EXISTS`, so each type is looked up in
//! `pg_type` first and only created when missing. Tables and indexes use
//! `IF NOT EXISTS` directly.

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::config::{PHRASE_STATUS_TYPE, RESPONSE_STATUS_TYPE};
use crate::error_handling::StorageError;
use crate::record::{Phrase, Status, Topic};
use crate::storage::executor::{SqlExecutor, Statement};

/// Quotes an SQL identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes an SQL string literal ("i'm a teapot" needs this).
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn enum_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.map(quote_literal).collect::<Vec<_>>().join(", ")
}

/// Catalog lookup for a type name; returns a row only if the type exists.
pub fn type_exists_statement(type_name: &str) -> Statement {
    Statement::new("SELECT 1 FROM pg_type WHERE typname = $1").bind(type_name)
}

/// `CREATE TYPE response_status AS ENUM ('responsive', 'unresponsive')`
pub fn create_response_status_type_statement() -> Statement {
    Statement::new(format!(
        "CREATE TYPE {RESPONSE_STATUS_TYPE} AS ENUM ({})",
        enum_labels(Status::iter().map(|s| s.as_str()))
    ))
}

/// `CREATE TYPE phrase_status AS ENUM ('continue', ..., 'page content not expected')`
pub fn create_phrase_type_statement() -> Statement {
    Statement::new(format!(
        "CREATE TYPE {PHRASE_STATUS_TYPE} AS ENUM ({})",
        enum_labels(Phrase::all().map(|p| p.as_str()))
    ))
}

/// Per-topic table.
pub fn create_table_statement(topic: &Topic) -> Statement {
    Statement::new(format!(
        "CREATE TABLE IF NOT EXISTS {table} (
    id SERIAL PRIMARY KEY,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    topic_offset BIGINT DEFAULT -1,
    test_from varchar(32) NOT NULL,
    url varchar(256) NOT NULL,
    event_time BIGINT,
    status {RESPONSE_STATUS_TYPE},
    phrase {PHRASE_STATUS_TYPE},
    dns integer DEFAULT -1,
    response integer DEFAULT -1,
    detail varchar(128)
)",
        table = quote_ident(&topic.table_name()),
    ))
}

/// Index on the per-topic table's `url` column.
pub fn create_index_statement(topic: &Topic) -> Statement {
    Statement::new(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (url)",
        quote_ident(&topic.index_name()),
        quote_ident(&topic.table_name()),
    ))
}

/// Creates the `response_status` and `phrase_status` enum types unless they exist.
///
/// The existence check runs on every call; `CREATE TYPE` runs only for missing types.
pub async fn create_type_schema<E>(executor: &E) -> Result<(), StorageError>
where
    E: SqlExecutor + ?Sized,
{
    let types = [
        (RESPONSE_STATUS_TYPE, create_response_status_type_statement()),
        (PHRASE_STATUS_TYPE, create_phrase_type_statement()),
    ];
    for (type_name, create) in types {
        if executor.exists(&type_exists_statement(type_name)).await? {
            debug!("Type {type_name} already exists");
            continue;
        }
        executor.execute(&create).await?;
        info!("Created type {type_name}");
    }
    Ok(())
}

/// Creates the topic's table and its `url` index unless they exist.
pub async fn create_table_schema<E>(topic: &Topic, executor: &E) -> Result<(), StorageError>
where
    E: SqlExecutor + ?Sized,
{
    executor.execute(&create_table_statement(topic)).await?;
    executor.execute(&create_index_statement(topic)).await?;
    debug!("Ensured table {} for topic {topic}", topic.table_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::executor::SqlValue;
    use crate::storage::test_helpers::RecordingExecutor;

    fn aiven() -> Topic {
        Topic::new("aiven.io").unwrap()
    }

    #[test]
    fn test_response_status_type_sql() {
        assert_eq!(
            create_response_status_type_statement().sql(),
            "CREATE TYPE response_status AS ENUM ('responsive', 'unresponsive')"
        );
    }

    #[test]
    fn test_phrase_type_sql_lists_every_phrase() {
        let sql = create_phrase_type_statement().sql().to_string();
        assert!(sql.starts_with("CREATE TYPE phrase_status AS ENUM ('continue', "));
        assert!(sql.ends_with(
            "'domain not exist', 'ssl error', 'connection timeout', 'page content not expected')"
        ));
        assert!(sql.contains("'i''m a teapot'"));
        assert!(sql.contains("'non-authoritative information'"));
        assert_eq!(sql.matches("', '").count(), Phrase::all().count() - 1);
    }

    #[test]
    fn test_table_sql() {
        let sql = create_table_statement(&aiven()).sql().to_string();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"web_activity_aiven_io\" ("));
        for column in [
            "id SERIAL PRIMARY KEY",
            "created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP",
            "topic_offset BIGINT DEFAULT -1",
            "test_from varchar(32) NOT NULL",
            "url varchar(256) NOT NULL",
            "event_time BIGINT",
            "status response_status",
            "phrase phrase_status",
            "dns integer DEFAULT -1",
            "response integer DEFAULT -1",
            "detail varchar(128)",
        ] {
            assert!(sql.contains(column), "missing column definition: {column}");
        }
    }

    #[test]
    fn test_index_sql() {
        assert_eq!(
            create_index_statement(&aiven()).sql(),
            "CREATE INDEX IF NOT EXISTS \"web_activity_url_index_aiven_io\" ON \"web_activity_aiven_io\" (url)"
        );
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[tokio::test]
    async fn test_type_schema_creates_missing_types() {
        let executor = RecordingExecutor::new();
        create_type_schema(&executor).await.unwrap();

        let statements = executor.statements();
        assert_eq!(
            statements,
            vec![
                type_exists_statement("response_status"),
                create_response_status_type_statement(),
                type_exists_statement("phrase_status"),
                create_phrase_type_statement(),
            ]
        );
        assert_eq!(
            statements[0].params(),
            &[SqlValue::Text("response_status".to_string())]
        );
    }

    #[tokio::test]
    async fn test_type_schema_skips_existing_types() {
        let executor = RecordingExecutor::new().with_existing_rows();
        create_type_schema(&executor).await.unwrap();
        assert_eq!(
            executor.statements(),
            vec![
                type_exists_statement("response_status"),
                type_exists_statement("phrase_status"),
            ]
        );
    }

    #[tokio::test]
    async fn test_type_schema_twice_checks_each_time_creates_once() {
        let executor = RecordingExecutor::new().with_catalog();
        create_type_schema(&executor).await.unwrap();
        create_type_schema(&executor).await.unwrap();

        let sql = executor.sql();
        assert_eq!(sql.iter().filter(|s| s.contains("pg_type")).count(), 4);
        assert_eq!(sql.iter().filter(|s| s.starts_with("CREATE TYPE")).count(), 2);
    }

    #[tokio::test]
    async fn test_table_schema_statements() {
        let executor = RecordingExecutor::new();
        create_table_schema(&aiven(), &executor).await.unwrap();
        assert_eq!(
            executor.statements(),
            vec![create_table_statement(&aiven()), create_index_statement(&aiven())]
        );
    }

    #[tokio::test]
    async fn test_schema_errors_propagate() {
        let executor = RecordingExecutor::new().failing();
        let result = create_table_schema(&aiven(), &executor).await;
        assert!(matches!(result, Err(StorageError::Sql(_))));
        // Nothing after the failing statement is attempted
        assert_eq!(executor.statements().len(), 1);
    }
}
