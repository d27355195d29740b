//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{DATABASE_URL_ENV, DB_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use crate::record::Topic;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Database configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use web_status::DatabaseConfig;
///
/// let config = DatabaseConfig {
///     max_connections: 2,
///     ..DatabaseConfig::new("postgres://localhost/web_status")
/// };
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    pub url: String,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Time to wait for a free connection
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Configuration for `url` with default pool limits.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DB_ACQUIRE_TIMEOUT,
        }
    }
}

/// Command-line options of the `web_status` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "web_status",
    version,
    about = "Persist website availability status records into PostgreSQL"
)]
pub struct Cli {
    /// Postgres connection URL
    #[arg(long, env = DATABASE_URL_ENV, global = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS, global = true)]
    pub max_connections: u32,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Database configuration, if a URL was given on the command line or in the environment.
    pub fn database_config(&self) -> Option<DatabaseConfig> {
        self.database_url.as_ref().map(|url| DatabaseConfig {
            max_connections: self.max_connections,
            ..DatabaseConfig::new(url.clone())
        })
    }
}

/// Subcommands of the `web_status` binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the enum types and the tables for the given topics (idempotent)
    InitSchema {
        /// Topics or domains, e.g. `aiven.io` or `aiven_io`
        #[arg(required = true)]
        topics: Vec<Topic>,
    },
    /// Print the last persisted log offset of a topic (-1 when empty)
    LastOffset {
        /// Topic or domain
        topic: Topic,
    },
    /// Insert captured MessagePack payload files, one record per file
    Ingest {
        /// Payload files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a MessagePack payload file as JSON
    Decode {
        /// Payload file
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/db");
        assert_eq!(config.url, "postgres://localhost/db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout, DB_ACQUIRE_TIMEOUT);
    }

    #[test]
    fn test_cli_parses_init_schema_topics() {
        let cli = Cli::try_parse_from([
            "web_status",
            "--database-url",
            "postgres://localhost/db",
            "init-schema",
            "aiven.io",
            "example.com",
        ])
        .unwrap();
        match cli.command {
            Command::InitSchema { ref topics } => {
                let names: Vec<&str> = topics.iter().map(Topic::as_str).collect();
                assert_eq!(names, vec!["aiven_io", "example_com"]);
            }
            ref other => panic!("unexpected command {other:?}"),
        }
        let db = cli.database_config().unwrap();
        assert_eq!(db.url, "postgres://localhost/db");
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "web_status",
            "last-offset",
            "aiven_io",
            "--max-connections",
            "2",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.max_connections, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert!(matches!(cli.command, Command::LastOffset { .. }));
    }

    #[test]
    fn test_cli_rejects_invalid_topic() {
        let result = Cli::try_parse_from(["web_status", "last-offset", "bad topic!"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_at_least_one_file() {
        let result = Cli::try_parse_from(["web_status", "ingest"]);
        assert!(result.is_err());
    }
}
