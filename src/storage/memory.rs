//! In-process storage with browser `localStorage` behaviour.
//!
//! Clones share one slot map, so a test can keep a handle while the store
//! owns another and observe exactly what was persisted. Writes are checked
//! against a byte quota, and faults can be injected to exercise the store's
//! rollback path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DEFAULT_QUOTA_BYTES, Storage, StorageError};

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl Slots {
    /// Bytes held by every entry except `key`.
    fn used_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Shared in-memory slot map.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    slots: Arc<Mutex<Slots>>,
    quota_bytes: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Storage that rejects writes once keys plus values exceed `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { slots: Arc::new(Mutex::new(Slots::default())), quota_bytes }
    }

    /// Make every subsequent `set_item`/`remove_item` fail until turned off.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Raw value for `key`, bypassing the fault switch.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Seed `key` directly, bypassing quota and faults.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) {
        self.lock().entries.insert(key.to_string(), value.into());
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.lock();
        if slots.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }

        let attempted = slots.used_excluding(key) + key.len() + value.len();
        if attempted > self.quota_bytes {
            return Err(StorageError::QuotaExceeded { key: key.to_string(), limit: self.quota_bytes, attempted });
        }

        slots.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.lock();
        if slots.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        slots.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
