//! Key-value substrate for state persistence.
//!
//! State lives in a string-keyed store of JSON-encoded strings, the
//! shape of a browser's local storage. This trait is that substrate:
//! adapters supply an in-memory map or a directory of files, and the
//! JSON codec lives one layer up in [`super::JsonStateRepository`].

use thiserror::Error;

/// Errors raised by key-value store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyValueStoreError {
    /// The backing store rejected or failed the operation.
    #[error("storage backend failed for key '{key}': {message}")]
    Backend {
        /// The key involved.
        key: String,
        /// Description of the failure.
        message: String,
    },
    /// The key cannot be represented by this adapter.
    #[error("invalid storage key '{key}': {message}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        message: String,
    },
}

impl KeyValueStoreError {
    /// Builds a [`KeyValueStoreError::Backend`].
    pub fn backend(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Builds a [`KeyValueStoreError::InvalidKey`].
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Synchronous string-keyed store of string values.
///
/// Reads distinguish absent keys (`Ok(None)`) from failures; deleting an
/// absent key is a successful no-op.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetches the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Removes the value stored under `key`; absent keys are a no-op.
    fn delete(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

impl<S> KeyValueStore for std::sync::Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KeyValueStoreError> {
        (**self).delete(key)
    }
}
