//! Filename validation
//!
//! Every name that reaches the filesystem passes through here, so nothing
//! outside the target folder can be addressed.

use uuid::Uuid;

use crate::error::StorageError;

/// Length of the `{uuid}_` prefix on stored names
pub const STORED_PREFIX_LEN: usize = 37;

/// Checks that `name` is a single, plain path component.
pub fn validate_filename(name: &str, max_length: usize) -> Result<(), StorageError> {
    let valid = !name.trim().is_empty()
        && name.len() <= max_length
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control);

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidFilename(name.to_string()))
    }
}

/// Builds the on-disk name `{id}_{original}`
pub fn stored_name(id: Uuid, original_name: &str) -> String {
    format!("{}_{}", id, original_name)
}
