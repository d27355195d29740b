//! MessagePack wire codec for status records.
//!
//! A payload is a MessagePack map keyed by field name:
//!
//! | key | value |
//! |---|---|
//! | `from` | str |
//! | `url` | str |
//! | `timestamp` | float64, UTC epoch seconds |
//! | `status` | str |
//! | `phrase` | str |
//! | `dns` | number or nil, milliseconds |
//! | `response` | number or nil, milliseconds |
//! | `detail` | str |
//! | `offset` | int |
//!
//! Keys are written in this order, which makes the bytes identical to payloads from
//! the Python publisher, but readers accept any order. Every key is required and no
//! other key is allowed. Fractional timings are rounded to whole milliseconds.


use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error_handling::CodecError;
use crate::record::StatusRecord;

/// Field-keyed wire form of a [`StatusRecord`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload {
    from: String,
    url: String,
    timestamp: f64,
    status: String,
    phrase: String,
    // deserialize_with keeps nil allowed but makes the key itself mandatory
    #[serde(deserialize_with = "deserialize_millis")]
    dns: Option<i32>,
    #[serde(deserialize_with = "deserialize_millis")]
    response: Option<i32>,
    detail: String,
    offset: i64,
}

/// Any MessagePack number; publishers send whatever the probe measured.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Millis {
    Int(i64),
    Float(f64),
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = match Option::<Millis>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(millis) => millis,
    };
    let rounded = match millis {
        Millis::Int(value) => i32::try_from(value).ok(),
        Millis::Float(value) => {
            let value = value.round();
            (value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX))
                .then_some(value as i32)
        }
    };
    rounded
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("timing {millis:?} is out of range")))
}

impl From<&StatusRecord> for Payload {
    fn from(record: &StatusRecord) -> Self {
        Payload {
            from: record.source().to_string(),
            url: record.url().to_string(),
            timestamp: record.timestamp(),
            status: record.status().as_str().to_string(),
            phrase: record.phrase().as_str().to_string(),
            dns: record.dns_time(),
            response: record.response_time(),
            detail: record.detail().to_string(),
            offset: record.offset(),
        }
    }
}

impl TryFrom<Payload> for StatusRecord {
    type Error = CodecError;

    fn try_from(payload: Payload) -> Result<Self, Self::Error> {
        let mut record =
            StatusRecord::parse(&payload.from, &payload.url, &payload.status, &payload.phrase)?
                .with_detail(payload.detail)
                .with_offset(payload.offset);
        if let Some(dns) = payload.dns {
            record = record.with_dns_time(dns);
        }
        if let Some(response) = payload.response {
            record = record.with_response_time(response);
        }
        // The constructor stamped "now"; the probe time travels in the payload.
        Ok(record.with_timestamp(payload.timestamp))
    }
}

/// Serializes a record into a MessagePack payload.
pub fn encode(record: &StatusRecord) -> Result<Vec<u8>, CodecError> {
    Ok(rmp_serde::to_vec_named(&Payload::from(record))?)
}

/// Rebuilds a record from a MessagePack payload.
///
/// Text fields are normalized and the topic is derived exactly as in
/// [`StatusRecord::new`]; the timestamp is taken from the payload verbatim.
///
/// # Errors
///
/// - [`CodecError::NotAMap`] when the payload is not a MessagePack map
/// - [`CodecError::Decode`] for malformed or truncated bytes, missing keys and unknown keys
/// - [`CodecError::TrailingBytes`] when bytes follow a complete payload
/// - [`CodecError::Record`] when the values do not form a valid record
pub fn decode(bytes: &[u8]) -> Result<StatusRecord, CodecError> {
    // fixmap, map16 or map32; rmp_serde would also accept a positional array
    if let Some(&marker) = bytes.first() {
        if !matches!(marker, 0x80..=0x8f | 0xde | 0xdf) {
            return Err(CodecError::NotAMap(marker));
        }
    }
    let mut rest = bytes;
    let payload: Payload = rmp_serde::from_read(&mut rest)?;
    if !rest.is_empty() {
        return Err(CodecError::TrailingBytes(rest.len()));
    }
    StatusRecord::try_from(payload)
}

/// Renders a record as a JSON object using the wire field names.
pub fn to_json(record: &StatusRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Payload::from(record))
}
