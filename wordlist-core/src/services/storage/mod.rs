//! Durable key-value storage the word list writes through to.

use std::io;

mod file;
#[cfg(test)]
mod memory;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;

/// Key holding the JSON array of entries.
pub const ENTRIES_KEY: &str = "itens";

/// Key holding the theme preference.
pub const THEME_KEY: &str = "tema";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A flat string-to-string store, read at startup and written after every
/// mutation.
pub trait KeyValueStore {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if ok {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}
