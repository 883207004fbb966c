//! Session result types
//!
//! Defines result structures returned by session operations.

use crate::storage::Department;

/// Result of a login operation
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub username: String,
    pub department: Department,
    /// The session was already logged in and has been re-authenticated
    pub was_logged_in: bool,
}

/// Result of a logout operation
#[derive(Debug, Clone)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}
