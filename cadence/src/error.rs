use thiserror::Error;

use crate::record::ResultRecord;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a [`ResultStore`](crate::ResultStore) backend
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct StoreError {
    context: String,
    #[source]
    source: BoxedError,
}

impl StoreError {
    /// Wrap a backend error with a short description of what was attempted
    pub fn new(context: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }

    /// What the store was doing when it failed
    pub fn context(&self) -> &str {
        &self.context
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No reference text available - a session cannot start without one")]
    MissingText,

    /// The session finished, but its result could not be stored.
    ///
    /// The session stays finished and keeps the record pending, so the caller can
    /// call [`TypingSession::retry_persist`](crate::TypingSession::retry_persist).
    #[error("Failed to save result ({} wpm, {}% accuracy): {source}", .record.words_per_minute, .record.accuracy_percent)]
    Persist {
        record: ResultRecord,
        source: StoreError,
    },
}
