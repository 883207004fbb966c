//! Authentication validator
//!
//! Checks a username/password pair against the credential store. Every
//! failure, whatever its cause, is reported as the same `InvalidCredentials`.

use super::credentials::{CredentialRecord, CredentialStore};
use crate::error::AuthError;

/// Performs basic input sanitation to check for malicious or malformed usernames/passwords.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Returns the department of `username` if `password` matches exactly.
pub fn authenticate(
    store: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let max_length = store.max_input_length();
    if !is_valid_input(username, max_length) || !is_valid_input(password, max_length) {
        return Err(AuthError::InvalidCredentials);
    }

    match store.lookup(username) {
        Some(CredentialRecord {
            password: Some(stored),
            department: Some(department),
        }) if stored == password => Ok(department.clone()),
        _ => Err(AuthError::InvalidCredentials),
    }
}
