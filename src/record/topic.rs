//! Topic naming.
//!
//! A topic is the probed host with dots replaced by underscores. The same name is
//! used for the log subject and as the suffix of the per-topic table.

use std::fmt;
use std::str::FromStr;

use crate::config::{INDEX_NAME_PREFIX, MAX_IDENTIFIER_LEN, TABLE_NAME_PREFIX};
use crate::error_handling::RecordError;

/// Per-domain subject name, e.g. `aiven_io` for `https://aiven.io`.
///
/// Only ASCII letters, digits, `-` and `_` survive validation, so the name can be
/// embedded in quoted SQL identifiers. The name is also short enough that the
/// derived table and index names stay within the Postgres identifier limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(String);

impl Topic {
    /// Longest topic whose index name (the longer derived identifier) fits in
    /// [`MAX_IDENTIFIER_LEN`].
    pub const MAX_LEN: usize = MAX_IDENTIFIER_LEN - INDEX_NAME_PREFIX.len();

    /// Builds a topic from a bare domain such as `aiven.io`.
    ///
    /// Names that were already converted (`aiven_io`) are accepted unchanged.
    /// Hosts longer than [`Topic::MAX_LEN`] bytes are rejected.
    pub fn new(domain: &str) -> Result<Self, RecordError> {
        let name = domain.trim().to_ascii_lowercase().replace('.', "_");
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_LEN
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RecordError::InvalidHost(domain.to_string()));
        }
        Ok(Topic(name))
    }

    /// Derives the topic from the host component of a URL.
    ///
    /// Port and credentials are not part of the host and are ignored.
    pub fn from_url(url: &str) -> Result<Self, RecordError> {
        let parsed = url::Url::parse(url).map_err(|e| RecordError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let host = parsed
            .host_str()
            .ok_or_else(|| RecordError::InvalidHost(url.to_string()))?;
        Self::new(host)
    }

    /// The topic name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destination table, `web_activity_<topic>`.
    pub fn table_name(&self) -> String {
        format!("{TABLE_NAME_PREFIX}{}", self.0)
    }

    /// Index on the table's `url` column, `web_activity_url_index_<topic>`.
    pub fn index_name(&self) -> String {
        format!("{INDEX_NAME_PREFIX}{}", self.0)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Topic {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::new(s)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
