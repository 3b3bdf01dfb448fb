//! Expiring wishlist — a client-local store of products saved for 24 hours.
//!
//! ARCHITECTURE
//! ============
//! [`store::WishlistStore`] owns the saved items and one named storage slot.
//! Backends implement [`storage::Storage`] (`localStorage`-style string
//! slots); time comes from a [`clock::Clock`] so expiry can be driven
//! deterministically. UI code and the `wishlist` binary are collaborators
//! that call the store and render what it returns.

pub mod clock;
pub mod config;
pub mod error;
pub mod item;
pub mod storage;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::WishlistConfig;
pub use error::{ErrorCode, WishlistError};
pub use item::{ITEM_TTL_HOURS, WishlistItem};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{LoadState, WishlistStore};
