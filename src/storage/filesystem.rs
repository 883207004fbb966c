//! File system helpers
//!
//! Thin async wrappers over `tokio::fs` used by the storage operations.

use std::io::{ErrorKind, Result};
use std::path::Path;
use tokio::fs;

/// Create a directory and any missing parents
pub async fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await
}

/// Size of `path` if it is a regular file; `None` if it is missing or something else
pub async fn regular_file_len(path: &Path) -> Result<Option<u64>> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(Some(metadata.len())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Best-effort removal of a leftover file
pub async fn discard(path: &Path) {
    let _ = fs::remove_file(path).await;
}
