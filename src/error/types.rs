//! Error types
//!
//! Defines domain-specific error types for each module of the share server.

use axum::extract::rejection::{JsonRejection, PathRejection};
use std::fmt;
use std::io;

/// Authentication module errors
#[derive(Debug)]
pub enum AuthError {
    /// Unknown user, wrong password, malformed record or input.
    /// Carries no detail about which one.
    InvalidCredentials,
    NotLoggedIn,
    CredentialSource(String),
}

impl AuthError {
    /// Message safe to show to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials!".into(),
            AuthError::NotLoggedIn => "Please log in first.".into(),
            AuthError::CredentialSource(_) => "Authentication is unavailable.".into(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::NotLoggedIn => write!(f, "User not logged in"),
            AuthError::CredentialSource(s) => write!(f, "Credential source error: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    FileNotFound(String),
    InvalidFilename(String),
    FileTooLarge { limit_bytes: u64 },
    UploadInterrupted(io::Error),
    Unavailable(io::Error),
}

impl StorageError {
    /// Message safe to show to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            StorageError::FileNotFound(name) => format!("File not found: {}", name),
            StorageError::InvalidFilename(name) => format!("Invalid file name: {}", name),
            StorageError::FileTooLarge { limit_bytes } => {
                format!("File size exceeds {} limit.", format_limit(*limit_bytes))
            }
            StorageError::UploadInterrupted(_) => "Upload interrupted, please try again.".into(),
            StorageError::Unavailable(_) => "Storage unavailable, please try again later.".into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::InvalidFilename(p) => write!(f, "Invalid filename: {}", p),
            StorageError::FileTooLarge { limit_bytes } => {
                write!(f, "File exceeds size limit of {} bytes", limit_bytes)
            }
            StorageError::UploadInterrupted(e) => write!(f, "Upload interrupted: {}", e),
            StorageError::Unavailable(e) => write!(f, "Storage unavailable: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Unavailable(e) | StorageError::UploadInterrupted(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Unavailable(error)
    }
}

/// Session module errors
#[derive(Debug)]
pub enum SessionError {
    MissingCookie,
    /// Unknown or past its TTL
    Expired,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MissingCookie => write!(f, "No session cookie presented"),
            SessionError::Expired => write!(f, "Session expired or unknown"),
        }
    }
}

impl std::error::Error for SessionError {}

/// General share server error that encompasses all error types
#[derive(Debug)]
pub enum ShareError {
    Auth(AuthError),
    Storage(StorageError),
    Session(SessionError),
    /// Request that could not be decoded (path, body)
    BadRequest(String),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl ShareError {
    /// Short machine-readable kind, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ShareError::Auth(AuthError::InvalidCredentials) => "invalid_credentials",
            ShareError::Auth(AuthError::NotLoggedIn) => "not_logged_in",
            ShareError::Auth(AuthError::CredentialSource(_)) => "credentials_unavailable",
            ShareError::Storage(StorageError::FileNotFound(_)) => "file_not_found",
            ShareError::Storage(StorageError::InvalidFilename(_)) => "invalid_filename",
            ShareError::Storage(StorageError::FileTooLarge { .. }) => "file_too_large",
            ShareError::Storage(StorageError::UploadInterrupted(_)) => "upload_interrupted",
            ShareError::Storage(StorageError::Unavailable(_)) => "storage_unavailable",
            ShareError::Session(_) => "session",
            ShareError::BadRequest(_) => "bad_request",
            ShareError::Config(_) => "config",
            ShareError::IoError(_) => "io",
        }
    }

    /// Message safe to show to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            ShareError::Auth(e) => e.user_message(),
            ShareError::Storage(e) => e.user_message(),
            ShareError::Session(_) => AuthError::NotLoggedIn.user_message(),
            ShareError::BadRequest(_) => "Invalid request.".into(),
            ShareError::Config(_) | ShareError::IoError(_) => "Internal server error.".into(),
        }
    }
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Auth(e) => write!(f, "Authentication error: {}", e),
            ShareError::Storage(e) => write!(f, "Storage error: {}", e),
            ShareError::Session(e) => write!(f, "Session error: {}", e),
            ShareError::BadRequest(detail) => write!(f, "Bad request: {}", detail),
            ShareError::Config(e) => write!(f, "Configuration error: {}", e),
            ShareError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ShareError {}

// Implement conversions from specific errors to ShareError
impl From<AuthError> for ShareError {
    fn from(error: AuthError) -> Self {
        ShareError::Auth(error)
    }
}

impl From<StorageError> for ShareError {
    fn from(error: StorageError) -> Self {
        ShareError::Storage(error)
    }
}

impl From<SessionError> for ShareError {
    fn from(error: SessionError) -> Self {
        ShareError::Session(error)
    }
}

impl From<PathRejection> for ShareError {
    fn from(rejection: PathRejection) -> Self {
        ShareError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ShareError {
    fn from(rejection: JsonRejection) -> Self {
        ShareError::BadRequest(rejection.body_text())
    }
}

impl From<config::ConfigError> for ShareError {
    fn from(error: config::ConfigError) -> Self {
        ShareError::Config(error)
    }
}

impl From<io::Error> for ShareError {
    fn from(error: io::Error) -> Self {
        ShareError::IoError(error)
    }
}

/// Renders a byte limit the way users expect to read it: "1GB", "5MB", "512 bytes".
pub(crate) fn format_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const GIB: u64 = 1024 * MIB;
    if bytes >= GIB && bytes % GIB == 0 {
        format!("{}GB", bytes / GIB)
    } else if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
