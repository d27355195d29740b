//! Website status records.
//!
//! A [`StatusRecord`] is the outcome of one availability probe. It is built once at
//! probe time, gets its log offset from the transport, travels over the log as a
//! MessagePack payload (see [`crate::codec`]) and is persisted as a single row.
//!
//! Construction normalizes text to lower case and derives the record's [`Topic`]
//! from the URL host. Fields are read-only once built.

mod phrase;
mod status;
mod topic;


use chrono::Utc;
use regex::Regex;

use crate::config::UNASSIGNED_OFFSET;
use crate::error_handling::RecordError;

pub use phrase::Phrase;
pub use status::Status;
pub use topic::Topic;

/// One probe result.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    source: String,
    url: String,
    timestamp: f64,
    status: Status,
    phrase: Phrase,
    dns_time: Option<i32>,
    response_time: Option<i32>,
    detail: String,
    offset: i64,
    topic: Topic,
}

impl StatusRecord {
    /// Creates a record stamped with the current UTC time and an unassigned offset.
    ///
    /// `source` and `url` are lower-cased. Fails if the URL has no host that can be
    /// used as a topic.
    ///
    /// # Example
    ///
    /// ```
    /// use web_status::{Phrase, Status, StatusRecord};
    ///
    /// let record = StatusRecord::new("Sydney", "https://aiven.io", Status::Responsive, Phrase::Ok)
    ///     .unwrap()
    ///     .with_dns_time(10)
    ///     .with_response_time(300);
    /// assert_eq!(record.source(), "sydney");
    /// assert_eq!(record.topic().as_str(), "aiven_io");
    /// assert!(!record.abnormal());
    /// ```
    pub fn new(
        source: &str,
        url: &str,
        status: Status,
        phrase: Phrase,
    ) -> Result<Self, RecordError> {
        let url = url.to_lowercase();
        let topic = Topic::from_url(&url)?;
        Ok(StatusRecord {
            source: source.to_lowercase(),
            url,
            timestamp: now_timestamp(),
            status,
            phrase,
            dns_time: None,
            response_time: None,
            detail: String::new(),
            offset: UNASSIGNED_OFFSET,
            topic,
        })
    }

    /// Like [`StatusRecord::new`], but takes status and phrase as free text in any case.
    pub fn parse(source: &str, url: &str, status: &str, phrase: &str) -> Result<Self, RecordError> {
        Self::new(source, url, status.parse()?, phrase.parse()?)
    }

    /// Sets the DNS resolution time in milliseconds.
    pub fn with_dns_time(mut self, millis: i32) -> Self {
        self.dns_time = Some(millis);
        self
    }

    /// Sets the total page load time in milliseconds.
    pub fn with_response_time(mut self, millis: i32) -> Self {
        self.response_time = Some(millis);
        self
    }

    /// Sets the detail text (the expected-content pattern for
    /// [`Phrase::PageContentNotExpected`]).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Sets the log offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Replaces the construction-time timestamp (UTC epoch seconds).
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Where the probe ran from (lower case).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Probed URL (lower case).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Probe time as UTC epoch seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Response outcome.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Outcome phrase.
    pub fn phrase(&self) -> Phrase {
        self.phrase
    }

    /// DNS resolution time in milliseconds, if measured.
    pub fn dns_time(&self) -> Option<i32> {
        self.dns_time
    }

    /// Page load time in milliseconds, if measured.
    pub fn response_time(&self) -> Option<i32> {
        self.response_time
    }

    /// Detail text, empty unless the phrase needs one.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Log offset, `-1` while unassigned.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Topic derived from the URL host.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// True when the site is unresponsive, or responsive with any phrase but "ok".
    pub fn abnormal(&self) -> bool {
        self.status == Status::Unresponsive || self.phrase != Phrase::Ok
    }

    /// Compiles the expected-content pattern carried in `detail`.
    ///
    /// Returns `None` unless the phrase is [`Phrase::PageContentNotExpected`] and
    /// `detail` is non-empty.
    pub fn detail_pattern(&self) -> Option<Result<Regex, regex::Error>> {
        if self.phrase != Phrase::PageContentNotExpected || self.detail.is_empty() {
            return None;
        }
        Some(Regex::new(&self.detail))
    }
}

/// Current UTC time as epoch seconds with microsecond precision.
fn now_timestamp() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}
