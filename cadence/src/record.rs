//! # Record Module - Results and Where They Go
//!
//! A [`ResultRecord`] is the frozen outcome of one finished attempt. It is created
//! exactly once, at the moment a session finishes, and handed to a [`ResultStore`].
//! After that the session no longer owns it.
//!
//! ## Persisted Shape
//!
//! Records serialize to the same JSON shape regardless of the storage backend:
//!
//! ```json
//! {
//!   "wpm": 42,
//!   "accuracy": 97,
//!   "timeElapsed": 61,
//!   "errors": 3,
//!   "textLength": 212,
//!   "date": "2024-05-01T12:00:00.000Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::metrics::SessionMetrics;

/// Immutable outcome of a finished attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "wpm")]
    pub words_per_minute: u32,
    /// Capped at 100 when read back
    #[serde(rename = "accuracy", deserialize_with = "percent::deserialize")]
    pub accuracy_percent: u8,
    #[serde(rename = "timeElapsed")]
    pub elapsed_seconds: u64,
    #[serde(rename = "errors")]
    pub error_count: usize,
    #[serde(rename = "textLength")]
    pub text_length: usize,
    #[serde(rename = "date", with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl ResultRecord {
    /// Freeze a metrics snapshot into a record
    pub fn new(metrics: &SessionMetrics, text_length: usize, timestamp: DateTime<Utc>) -> Self {
        Self {
            words_per_minute: metrics.words_per_minute,
            accuracy_percent: metrics.accuracy_percent,
            elapsed_seconds: metrics.elapsed_seconds,
            error_count: metrics.error_count,
            text_length,
            timestamp,
        }
    }

    /// Errors as a percentage of the text length, 0 for an empty text
    pub const fn error_rate(&self) -> f64 {
        if self.text_length == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.text_length as f64 * 100.0
    }
}

/// Durable, append-only log of results
pub trait ResultStore {
    /// Append a record. On error, nothing is assumed to have been written.
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError>;
}

impl<S: ResultStore + ?Sized> ResultStore for &mut S {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        (**self).append(record)
    }
}

impl<S: ResultStore + ?Sized> ResultStore for Box<S> {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        (**self).append(record)
    }
}

/// In-memory result store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ResultRecord>,
}

impl MemoryStore {
    /// All records appended so far, oldest first
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Take the records out of the store
    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

impl ResultStore for MemoryStore {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Percentages read from storage, capped at 100
mod percent {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        u8::deserialize(deserializer).map(|value| value.min(100))
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
