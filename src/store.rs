//! Wishlist store — expiring, product-keyed saved items.
//!
//! ARCHITECTURE
//! ============
//! `WishlistStore` owns the in-memory collection and one storage slot. The
//! slot is the source of truth across reloads; memory is a cache of it.
//! UI callers get the collection newest-first plus a `loading` flag, and
//! call `add`/`remove`/`is_in_wishlist`/`cleanup_expired`/`refresh`.
//!
//! DESIGN
//! ======
//! - Write-through with rollback: every mutation builds the next collection
//!   aside, persists it, and only then swaps it into memory. A failed write
//!   leaves memory exactly as it was, so memory and storage never diverge.
//! - Add is an upsert: saving a product that is already present drops the
//!   old entry and prepends a fresh one with a new 24h window.
//! - Lifecycle: `Uninitialized -> Loading -> Ready`. Mutations before the
//!   first `load()` are rejected with [`WishlistError::NotReady`].
//!
//! TRADE-OFFS
//! ==========
//! Expiry is checked only at `load`/`refresh` and `cleanup_expired`, never on
//! reads and never on a timer. `is_in_wishlist` may therefore report an item
//! whose deadline has passed since the last load or cleanup; that is the
//! staleness bound.

use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::WishlistConfig;
use crate::error::{ErrorCode, WishlistError};
use crate::item::WishlistItem;
use crate::storage::{FileStorage, Storage, load_json, save_json};

/// Where a store is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Constructed, `load()` not yet called.
    Uninitialized,
    /// Reading the storage slot.
    Loading,
    /// Loaded (possibly empty); mutations allowed.
    Ready,
}

/// Client-local store of saved items with a fixed 24-hour lifetime.
#[derive(Debug)]
pub struct WishlistStore<S: Storage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    items: Vec<WishlistItem>,
    state: LoadState,
}

impl WishlistStore<FileStorage, SystemClock> {
    /// Open the file-backed store described by `config` and load it.
    #[must_use]
    pub fn open_file(config: &WishlistConfig) -> Self {
        let storage = FileStorage::with_quota(&config.storage_dir, config.quota_bytes);
        Self::open(storage, SystemClock, config.storage_key.clone())
    }
}

impl<S: Storage, C: Clock> WishlistStore<S, C> {
    /// Create an unloaded store over the slot `key`.
    #[must_use]
    pub fn new(storage: S, clock: C, key: impl Into<String>) -> Self {
        Self { storage, clock, key: key.into(), items: Vec::new(), state: LoadState::Uninitialized }
    }

    /// Create a store and load it immediately.
    #[must_use]
    pub fn open(storage: S, clock: C, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, clock, key);
        store.load();
        store
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Read the slot, drop expired items, and write the survivors back if
    /// anything was dropped. Unreadable or corrupt slots load as empty.
    pub fn load(&mut self) {
        self.state = LoadState::Loading;

        let stored: Vec<WishlistItem> = load_json(&self.storage, &self.key).unwrap_or_default();
        let now = self.clock.now();
        let total = stored.len();
        let kept: Vec<WishlistItem> = stored.into_iter().filter(|item| !item.is_expired(now)).collect();
        let dropped = total - kept.len();

        if dropped > 0 {
            // EDGE: a failed write-back is harmless; the next load filters again.
            match save_json(&mut self.storage, &self.key, &kept) {
                Ok(()) => info!(key = %self.key, dropped, kept = kept.len(), "expired wishlist items removed on load"),
                Err(e) => warn!(
                    key = %self.key,
                    dropped,
                    error = %e,
                    code = e.error_code(),
                    "wishlist write-back cleanup failed"
                ),
            }
        }

        debug!(key = %self.key, count = kept.len(), "wishlist loaded");
        self.items = kept;
        self.state = LoadState::Ready;
    }

    /// Re-synchronize from storage. Same as [`Self::load`].
    pub fn refresh(&mut self) {
        self.load();
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Save a product for 24 hours. Returns `false` if it could not be persisted.
    pub fn add(&mut self, product_id: &str, product_name: &str, product_price: f64, product_image: &str) -> bool {
        match self.try_add(product_id, product_name, product_price, product_image) {
            Ok(_) => true,
            Err(e) => {
                report_failure("add", product_id, &e);
                false
            }
        }
    }

    /// Save a product for 24 hours, returning the stored item.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::NotReady`] before the first load,
    /// [`WishlistError::EmptyProductId`] for a blank id,
    /// [`WishlistError::InvalidPrice`] for a NaN or infinite price, and a serialize or
    /// storage error if the write fails. Memory is unchanged on error.
    pub fn try_add(
        &mut self,
        product_id: &str,
        product_name: &str,
        product_price: f64,
        product_image: &str,
    ) -> Result<WishlistItem, WishlistError> {
        self.ensure_ready()?;
        if product_id.trim().is_empty() {
            return Err(WishlistError::EmptyProductId);
        }
        // EDGE: serde_json writes non-finite floats as `null`, which then
        // fails to load and takes the whole slot down with it.
        if !product_price.is_finite() {
            return Err(WishlistError::InvalidPrice(product_price));
        }

        let item = WishlistItem::new(product_id, product_name, product_price, product_image, self.clock.now());
        let replaced = self.items.iter().filter(|i| i.product_id == product_id).count();

        let mut next = Vec::with_capacity(self.items.len() + 1 - replaced);
        next.push(item.clone());
        next.extend(self.items.iter().filter(|i| i.product_id != product_id).cloned());
        self.commit(next)?;

        debug!(product_id, id = %item.id, replaced, expires_at = %item.expires_at, "wishlist item added");
        Ok(item)
    }

    /// Remove every entry for a product. Removing an absent product succeeds.
    pub fn remove(&mut self, product_id: &str) -> bool {
        match self.try_remove(product_id) {
            Ok(_) => true,
            Err(e) => {
                report_failure("remove", product_id, &e);
                false
            }
        }
    }

    /// Remove every entry for a product, returning how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::NotReady`] before the first load and a
    /// serialize or storage error if the write fails. Memory is unchanged on error.
    pub fn try_remove(&mut self, product_id: &str) -> Result<usize, WishlistError> {
        self.ensure_ready()?;

        let next: Vec<WishlistItem> = self.items.iter().filter(|i| i.product_id != product_id).cloned().collect();
        let removed = self.items.len() - next.len();
        self.commit(next)?;

        debug!(product_id, removed, "wishlist item removed");
        Ok(removed)
    }

    /// Drop items whose deadline has passed and persist the result.
    pub fn cleanup_expired(&mut self) {
        if let Err(e) = self.try_cleanup_expired() {
            report_failure("cleanup", "", &e);
        }
    }

    /// Drop expired items, returning how many were dropped. Storage is only
    /// written when something was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::NotReady`] before the first load and a
    /// serialize or storage error if the write fails. Memory is unchanged on error.
    pub fn try_cleanup_expired(&mut self) -> Result<usize, WishlistError> {
        self.ensure_ready()?;

        let now = self.clock.now();
        let next: Vec<WishlistItem> = self.items.iter().filter(|i| !i.is_expired(now)).cloned().collect();
        let dropped = self.items.len() - next.len();
        if dropped == 0 {
            return Ok(0);
        }

        self.commit(next)?;
        info!(key = %self.key, dropped, kept = self.items.len(), "expired wishlist items cleaned up");
        Ok(dropped)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Whether a product is saved. Does not re-check expiry.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// The saved entry for a product, if any.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&WishlistItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Saved items, newest first.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// `true` until the first load completes.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state != LoadState::Ready
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn ensure_ready(&self) -> Result<(), WishlistError> {
        if self.state == LoadState::Ready { Ok(()) } else { Err(WishlistError::NotReady) }
    }

    /// Persist `next`, then make it the in-memory collection.
    fn commit(&mut self, next: Vec<WishlistItem>) -> Result<(), WishlistError> {
        save_json(&mut self.storage, &self.key, &next)?;
        self.items = next;
        Ok(())
    }
}

fn report_failure(op: &'static str, product_id: &str, e: &WishlistError) {
    match e {
        WishlistError::NotReady | WishlistError::EmptyProductId | WishlistError::InvalidPrice(_) => {
            warn!(op, product_id, error = %e, code = e.error_code(), "wishlist operation rejected");
        }
        WishlistError::Serialize(_) | WishlistError::Storage(_) => {
            error!(op, product_id, error = %e, code = e.error_code(), retryable = e.retryable(), "wishlist write failed");
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
