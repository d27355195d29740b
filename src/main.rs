//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `web_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use web_status::config::{Cli, Command, DATABASE_URL_ENV, UNASSIGNED_OFFSET};
use web_status::initialization::{init_db_pool, init_logger_with};
use web_status::{codec, RecordOutcome, Recorder, StatusRepository, StatusStore, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("web_status error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Decode { file } = &cli.command {
        let record = codec::decode(&read_payload(file)?)
            .with_context(|| format!("Failed to decode {}", file.display()))?;
        println!("{}", codec::to_json(&record)?);
        return Ok(());
    }

    let db_config = cli.database_config().with_context(|| {
        format!("No database URL: pass --database-url or set {DATABASE_URL_ENV}")
    })?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to initialize database pool")?;
    let repository = StatusRepository::from_pool(pool);

    match cli.command {
        Command::InitSchema { topics } => init_schema(&repository, &topics).await,
        Command::LastOffset { topic } => {
            let last = Recorder::new(repository).last_offset(&topic).await?;
            println!("{last}");
            Ok(())
        }
        Command::Ingest { files } => ingest(Recorder::new(repository), &files).await,
        Command::Decode { .. } => Ok(()),
    }
}

async fn init_schema(repository: &impl StatusStore, topics: &[Topic]) -> Result<()> {
    repository
        .ensure_types()
        .await
        .context("Failed to create enum types")?;
    for topic in topics {
        repository
            .ensure_table(topic)
            .await
            .with_context(|| format!("Failed to create table for {topic}"))?;
        info!("Schema ready for topic {topic}");
    }
    println!(
        "✅ Schema ready for {} topic{}",
        topics.len(),
        if topics.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn ingest<S: StatusStore>(recorder: Recorder<S>, files: &[impl AsRef<Path>]) -> Result<()> {
    recorder.prepare().await.context("Failed to create enum types")?;

    let (mut stored, mut skipped) = (0usize, 0usize);
    for file in files {
        let file = file.as_ref();
        let payload = read_payload(file)?;
        let outcome = recorder
            .record(&payload, UNASSIGNED_OFFSET)
            .await
            .with_context(|| format!("Failed to store {}", file.display()))?;
        match outcome {
            RecordOutcome::Stored(record) => {
                info!("Stored {} into {}", file.display(), record.topic().table_name());
                stored += 1;
            }
            RecordOutcome::Skipped(_) => skipped += 1,
        }
    }

    println!("✅ Stored {stored} record(s), skipped {skipped} undecodable payload(s)");
    Ok(())
}

fn read_payload(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
