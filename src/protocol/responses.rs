//! HTTP response handling
//!
//! Error bodies, the session cookie, and download responses.

use axum::Json;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Serialize;

use crate::error::handlers::{error_to_status, handle_error};
use crate::error::{ShareError, StorageError};
use crate::storage::{RetrieveResult, Scope};
use crate::transfer::stream_download;

pub const SESSION_COOKIE: &str = "DEPT_SHARE_SESSION";

/// JSON body of every failed API call
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub scope: Scope,
    pub files: Vec<String>,
}

impl IntoResponse for ShareError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = error_to_status(&self);
        let body = ErrorBody {
            error: self.kind(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// HTTP-only cookie carrying the session token; lives until the browser closes.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Cookie that, once removed from the jar, clears the session cookie.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Streams a stored file back unchanged as an attachment.
pub fn download_response(
    retrieved: RetrieveResult,
    buffer_size: usize,
) -> Result<Response, ShareError> {
    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        encode_component(&retrieved.name)
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(retrieved.size));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|_| StorageError::InvalidFilename(retrieved.name.clone()))?,
    );

    let stream = stream_download(retrieved.file, buffer_size);
    Ok((StatusCode::OK, headers, Body::from_stream(stream)).into_response())
}

/// Percent-encodes everything except RFC 3986 unreserved characters.
pub fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
