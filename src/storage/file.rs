//! Filesystem storage: one JSON file per key under a directory.
//!
//! DESIGN
//! ======
//! `set_item` writes to a hidden temp file beside the target and renames it
//! into place, so readers only ever see a complete old value or a complete
//! new one. Keys map directly onto file names and are restricted to
//! `[A-Za-z0-9._-]` (no leading dot) to keep them inside the directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DEFAULT_QUOTA_BYTES, Storage, StorageError};

/// Directory-backed key/value storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: usize,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_quota(dir, DEFAULT_QUOTA_BYTES)
    }

    /// Storage rooted at `dir` that rejects single values larger than `quota_bytes`.
    #[must_use]
    pub fn with_quota(dir: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self { dir: dir.into(), quota_bytes }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if `key` cannot be used as a file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid { Ok(()) } else { Err(StorageError::InvalidKey(key.to_string())) }
}

/// Write `value` to `tmp`, flush it to disk, then rename it over `path`.
fn write_and_swap(tmp: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let attempted = key.len() + value.len();
        if attempted > self.quota_bytes {
            return Err(StorageError::QuotaExceeded { key: key.to_string(), limit: self.quota_bytes, attempted });
        }

        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        if let Err(e) = write_and_swap(&tmp, &path, value) {
            // EDGE: leave no stray temp file behind, whichever step failed.
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(key, bytes = value.len(), path = %path.display(), "storage slot written");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
