use std::fs;
use std::io::Write;
use std::path::PathBuf;

use cadence::{ResultRecord, ResultStore, StoreError};
use derive_more::From;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, trace};

pub const HISTORY_KEY: &str = "typing_history";
pub const LAST_RESULT_KEY: &str = "last_result";
pub const LANGUAGE_KEY: &str = "selected_language";

#[derive(Debug, From, Error)]
pub enum JsonStoreError {
    #[error("Failed to access '{path}': {error}")]
    #[from(skip)]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Failed to read stored value '{key}': {error}")]
    #[from(skip)]
    Parse {
        key: String,
        error: serde_json::Error,
    },

    #[error("Failed to encode value: {0}")]
    Encode(serde_json::Error),
}

/// Key-value store of JSON documents, one file per key
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// Open the store, creating `base_dir` if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|error| JsonStoreError::Io {
            path: base_dir.clone(),
            error,
        })?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Read the value stored under `key`, `None` if nothing is stored
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, JsonStoreError> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).map_err(|error| JsonStoreError::Io { path, error })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|error| JsonStoreError::Parse {
                key: key.to_string(),
                error,
            })
    }

    /// Store `value` under `key`, replacing the previous value atomically
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), JsonStoreError> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(value)?;
        let io_error = |error| JsonStoreError::Io {
            path: tmp_path.clone(),
            error,
        };

        let mut file = fs::File::create(&tmp_path).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;

        fs::rename(&tmp_path, &path).map_err(|error| JsonStoreError::Io { path, error })?;
        trace!(key, "stored value");
        Ok(())
    }

    /// Remove the value under `key`. Returns false if nothing was stored.
    pub fn remove(&self, key: &str) -> Result<bool, JsonStoreError> {
        let path = self.file_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(JsonStoreError::Io { path, error }),
        }
    }
}

/// Typing history and preferences on top of a [`JsonStore`]
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: JsonStore,
}

impl HistoryStore {
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        JsonStore::open(base_dir).map(|store| Self { store })
    }

    /// All stored results, oldest first
    pub fn history(&self) -> Result<Vec<ResultRecord>, JsonStoreError> {
        Ok(self.store.get(HISTORY_KEY)?.unwrap_or_default())
    }

    pub fn last_result(&self) -> Result<Option<ResultRecord>, JsonStoreError> {
        self.store.get(LAST_RESULT_KEY)
    }

    pub fn selected_language(&self) -> Result<Option<String>, JsonStoreError> {
        self.store.get(LANGUAGE_KEY)
    }

    pub fn set_selected_language(&self, code: &str) -> Result<(), JsonStoreError> {
        self.store.put(LANGUAGE_KEY, &code)
    }

    /// Remove the history and the last result. Returns how many results were removed.
    pub fn clear(&self) -> Result<usize, JsonStoreError> {
        let removed = self.history()?.len();
        self.store.remove(HISTORY_KEY)?;
        self.store.remove(LAST_RESULT_KEY)?;
        debug!(removed, "history cleared");
        Ok(removed)
    }

    /// The history write commits the record, so it goes last. A failure before it
    /// leaves the history untouched and the record can be appended again.
    fn push(&self, record: &ResultRecord) -> Result<(), JsonStoreError> {
        let mut history = self.history()?;
        history.push(record.clone());
        self.store.put(LAST_RESULT_KEY, record)?;
        self.store.put(HISTORY_KEY, &history)
    }
}

impl ResultStore for HistoryStore {
    fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        self.push(record)
            .map_err(|error| StoreError::new("Failed to append to history", error))
    }
}
