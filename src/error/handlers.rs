//! Error handlers
//!
//! Maps errors to HTTP status codes and logs them at the right level.

use crate::error::types::{AuthError, ShareError, StorageError};
use axum::http::StatusCode;
use log::{error, warn};

/// Log a share server error. Expected user mistakes are warnings, everything else is an error.
pub fn handle_error(err: &ShareError) {
    match error_to_status(err) {
        status if status.is_server_error() => error!("Share Server Error: {}", err),
        _ => warn!("Request rejected: {}", err),
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &ShareError) -> StatusCode {
    match err {
        ShareError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        ShareError::Auth(AuthError::NotLoggedIn) => StatusCode::UNAUTHORIZED,
        ShareError::Auth(AuthError::CredentialSource(_)) => StatusCode::SERVICE_UNAVAILABLE,
        ShareError::Storage(StorageError::FileNotFound(_)) => StatusCode::NOT_FOUND,
        ShareError::Storage(StorageError::InvalidFilename(_)) => StatusCode::BAD_REQUEST,
        ShareError::Storage(StorageError::FileTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        ShareError::Storage(StorageError::UploadInterrupted(_)) => StatusCode::BAD_REQUEST,
        ShareError::Storage(StorageError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        ShareError::Session(_) => StatusCode::UNAUTHORIZED,
        ShareError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ShareError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ShareError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    #[test]
    fn test_error_to_status() {
        assert_eq!(
            error_to_status(&AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_to_status(&SessionError::MissingCookie.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_to_status(&StorageError::FileTooLarge { limit_bytes: 1 }.into()),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            error_to_status(&StorageError::FileNotFound("a".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status(&StorageError::InvalidFilename("../a".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status(&ShareError::BadRequest("missing field".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status(
                &StorageError::Unavailable(std::io::Error::other("disk full")).into()
            ),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
