//! Storage result types
//!
//! Defines result structures returned by storage operations.

use tokio::fs::File;

/// Result of a file storage operation
#[derive(Debug, Clone)]
pub struct SaveResult {
    pub stored_name: String,
    pub size: u64,
}

/// Result of a file retrieval operation
#[derive(Debug)]
pub struct RetrieveResult {
    pub name: String,
    pub file: File,
    pub size: u64,
}

/// Result of a file deletion operation
#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub name: String,
    /// Whether a file existed and was removed
    pub deleted: bool,
}
