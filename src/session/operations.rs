//! Session operations
//!
//! Handles the LoggedOut ⇄ LoggedIn transitions.

use log::{info, warn};

use crate::auth::{CredentialStore, authenticate};
use crate::error::AuthError;
use crate::session::Session;
use crate::session::results::{LoginResult, LogoutResult};
use crate::storage::Layout;

/// Handles a login attempt. On failure the session is left untouched.
pub fn process_login(
    session: &mut Session,
    credentials: &CredentialStore,
    layout: &Layout,
    username: &str,
    password: &str,
) -> Result<LoginResult, AuthError> {
    let department_name = authenticate(credentials, username, password).inspect_err(|_| {
        warn!("Authentication failed for {:?}", username);
    })?;

    let department = layout
        .department(&department_name)
        .cloned()
        .ok_or_else(|| {
            warn!(
                "User {:?} belongs to unconfigured department {:?}",
                username, department_name
            );
            AuthError::InvalidCredentials
        })?;

    let was_logged_in = session.is_logged_in();
    session.set_logged_in(username.to_string(), department.clone());

    Ok(LoginResult {
        username: username.to_string(),
        department,
        was_logged_in,
    })
}

/// Handles logout; logging out a logged-out session is a no-op
pub fn process_logout(session: &mut Session) -> LogoutResult {
    let was_logged_in = session.is_logged_in();
    if let Some(username) = session.username() {
        info!("User {} logged out", username);
    }
    session.logout();

    LogoutResult { was_logged_in }
}
