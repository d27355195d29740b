//! Consumer-side recording of status messages.
//!
//! A [`Recorder`] takes raw log messages (payload bytes plus the log offset), decodes
//! them and persists each one through a [`StatusStore`]. Payloads that fail to
//! decode are logged and skipped so one bad message cannot stop a consumer loop;
//! storage errors are returned to the caller, which owns any retry policy.

use std::collections::HashSet;

use log::{debug, info, warn};
use tokio::sync::{Mutex, OnceCell};

use crate::codec;
use crate::config::UNASSIGNED_OFFSET;
use crate::error_handling::{CodecError, StorageError};
use crate::record::{StatusRecord, Topic};
use crate::storage::StatusStore;

/// What happened to one message.
#[derive(Debug)]
pub enum RecordOutcome {
    /// The record was inserted.
    Stored(StatusRecord),
    /// The payload could not be decoded and was dropped.
    Skipped(CodecError),
}

/// Persists decoded status messages, creating topic tables on first use.
pub struct Recorder<S> {
    store: S,
    types_ready: OnceCell<()>,
    ready_topics: Mutex<HashSet<Topic>>,
}

impl<S: StatusStore> Recorder<S> {
    /// Recorder writing through `store`.
    pub fn new(store: S) -> Self {
        Recorder {
            store,
            types_ready: OnceCell::new(),
            ready_topics: Mutex::new(HashSet::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensures the shared enum types exist.
    ///
    /// Runs at most once successfully per recorder; topic tables depend on the types,
    /// so [`resume_offset`](Self::resume_offset) and [`record`](Self::record) call it
    /// themselves.
    pub async fn prepare(&self) -> Result<(), StorageError> {
        self.types_ready
            .get_or_try_init(|| self.store.ensure_types())
            .await?;
        Ok(())
    }

    /// Position a consumer of `topic` should resume reading from: one past the last
    /// stored offset, or `0` when nothing has been stored.
    pub async fn resume_offset(&self, topic: &Topic) -> Result<i64, StorageError> {
        let last = self.last_offset(topic).await?;
        info!("Topic {topic}: last stored offset {last}, resuming at {}", last + 1);
        Ok(last + 1)
    }

    /// Offset stored in the topic's newest row, `-1` when empty. Creates the
    /// types and the table first, so this works on a fresh database.
    pub async fn last_offset(&self, topic: &Topic) -> Result<i64, StorageError> {
        self.ensure_table(topic).await?;
        self.store.last_offset(topic).await
    }

    /// Decodes and stores one message read at log position `offset`.
    ///
    /// The stored offset is always the log position, since resuming relies on it.
    /// Pass [`UNASSIGNED_OFFSET`] when the message was not read from the log (file
    /// replay); the payload's own offset is then kept.
    pub async fn record(&self, payload: &[u8], offset: i64) -> Result<RecordOutcome, StorageError> {
        let record = match codec::decode(payload) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping message at offset {offset}: {e}");
                return Ok(RecordOutcome::Skipped(e));
            }
        };
        let record = if offset == UNASSIGNED_OFFSET {
            record
        } else {
            if record.offset() != UNASSIGNED_OFFSET && record.offset() != offset {
                warn!(
                    "Payload offset {} differs from log offset {offset}; storing {offset}",
                    record.offset()
                );
            }
            record.with_offset(offset)
        };

        self.ensure_table(record.topic()).await?;
        self.store.insert(&record).await?;

        if record.abnormal() {
            warn!(
                "{} is {} ({}) from {}",
                record.url(),
                record.status(),
                record.phrase(),
                record.source()
            );
        } else {
            debug!("{} is {} from {}", record.url(), record.phrase(), record.source());
        }
        Ok(RecordOutcome::Stored(record))
    }

    async fn ensure_table(&self, topic: &Topic) -> Result<(), StorageError> {
        let mut ready = self.ready_topics.lock().await;
        if ready.contains(topic) {
            return Ok(());
        }
        self.prepare().await?;
        self.store.ensure_table(topic).await?;
        ready.insert(topic.clone());
        Ok(())
    }
}
