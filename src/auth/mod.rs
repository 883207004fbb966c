//! Authentication system
//!
//! Handles credential loading and username/password validation.

pub mod credentials;
pub mod validator;

pub use credentials::{CredentialRecord, CredentialStore};
pub use validator::authenticate;
