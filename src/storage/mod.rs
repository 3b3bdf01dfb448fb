//! Durable key/value slots backing the wishlist.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store persists its whole collection as one JSON document under a
//! single named key, the way a browser page uses `localStorage`. Backends
//! implement [`Storage`]; the JSON helpers here centralize the
//! read/decode and encode/write glue so the store never touches raw strings.
//!
//! ERROR HANDLING
//! ==============
//! Reads are forgiving: a missing, empty, unreadable or corrupt slot loads as
//! `None` and is logged, never returned. Writes are strict and report every
//! failure so callers can keep memory and storage in step.

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::WishlistError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Default per-origin budget browsers give `localStorage` (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors produced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying filesystem operation failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The write would push the backend past its byte budget.
    #[error("storage quota exceeded for `{key}`: {attempted} bytes > {limit} bytes")]
    QuotaExceeded { key: String, limit: usize, attempted: usize },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// The backend refused the operation (disabled, offline, injected fault).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// STORAGE TRAIT
// =============================================================================

/// A string-valued key/value store with `localStorage` semantics.
pub trait Storage {
    /// Read the raw value for `key`, or `None` if the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`. Either the whole value lands or nothing does.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected or fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JSON HELPERS
// =============================================================================

/// Load a JSON value from `storage` for `key`.
pub fn load_json<T: DeserializeOwned, S: Storage + ?Sized>(storage: &S, key: &str) -> Option<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "storage slot absent");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "storage slot unreadable");
            return None;
        }
    };

    if raw.trim().is_empty() {
        debug!(key, "storage slot empty");
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, bytes = raw.len(), "storage slot corrupt; ignoring");
            None
        }
    }
}

/// Save a JSON value to `storage` for `key`.
///
/// # Errors
///
/// Returns [`WishlistError::Serialize`] if the value cannot be encoded and
/// [`WishlistError::Storage`] if the backend rejects the write.
pub fn save_json<T: Serialize + ?Sized, S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    value: &T,
) -> Result<(), WishlistError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
