//! Error types for the wishlist store and its storage backends.
//!
//! DESIGN
//! ======
//! Errors stay inside the crate boundary: the store collapses them into a
//! `bool` (writes) or an empty collection (reads) for UI callers, and the
//! `try_*` operations hand them out for callers that want the cause. Every
//! variant carries a grepable code via [`ErrorCode`].

use crate::storage::StorageError;

/// Grepable error code and retry hint, shared by every error in the crate.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced by wishlist store operations.
#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    /// A mutation was attempted before the store finished loading.
    #[error("wishlist store is not ready; call load() first")]
    NotReady,

    /// `add` was called with an empty product identifier.
    #[error("product id must not be empty")]
    EmptyProductId,

    /// `add` was called with a NaN or infinite price, which JSON cannot hold.
    #[error("product price must be finite, got {0}")]
    InvalidPrice(f64),

    /// The collection could not be encoded for the storage slot.
    #[error("failed to serialize wishlist: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for WishlistError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady => "E_NOT_READY",
            Self::EmptyProductId => "E_EMPTY_PRODUCT_ID",
            Self::InvalidPrice(_) => "E_INVALID_PRICE",
            Self::Serialize(_) => "E_SERIALIZE",
            Self::Storage(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Storage(e) => e.retryable(),
            _ => false,
        }
    }
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_STORAGE_IO",
            Self::QuotaExceeded { .. } => "E_STORAGE_QUOTA",
            Self::InvalidKey(_) => "E_STORAGE_INVALID_KEY",
            Self::Unavailable(_) => "E_STORAGE_UNAVAILABLE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
