//! Wishlist configuration parsed from environment variables.
//!
//! Optional:
//! - `WISHLIST_STORAGE_KEY`: slot name (default `wishlist`)
//! - `WISHLIST_STORAGE_DIR`: directory for file-backed slots (default `.wishlist`)
//! - `WISHLIST_QUOTA_BYTES`: per-backend byte budget (default 5 MiB)

use std::path::PathBuf;

use crate::storage::DEFAULT_QUOTA_BYTES;

pub const DEFAULT_STORAGE_KEY: &str = "wishlist";
pub const DEFAULT_STORAGE_DIR: &str = ".wishlist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistConfig {
    /// Name of the storage slot holding the serialized collection.
    pub storage_key: String,
    /// Root directory for [`crate::storage::FileStorage`].
    pub storage_dir: PathBuf,
    /// Byte budget enforced by the storage backends.
    pub quota_bytes: usize,
}

impl Default for WishlistConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl WishlistConfig {
    /// Build config from environment variables, falling back to defaults for
    /// anything unset, blank or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            storage_key: env_string("WISHLIST_STORAGE_KEY", DEFAULT_STORAGE_KEY),
            storage_dir: PathBuf::from(env_string("WISHLIST_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            quota_bytes: env_parse("WISHLIST_QUOTA_BYTES", DEFAULT_QUOTA_BYTES),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
