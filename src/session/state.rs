//! Module `state`
//!
//! Defines the `Session` struct: the explicit per-client value every action
//! receives, replacing any notion of a process-wide "current user".

use crate::error::AuthError;
use crate::storage::Department;

/// The two states of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Department),
}

/// Represents the state of one client's interaction with the server.
#[derive(Debug, Clone, Default)]
pub struct Session {
    username: Option<String>,
    state: SessionState,
}

impl Session {
    /// Resets the session to LoggedOut, clearing the username and department.
    pub fn logout(&mut self) {
        self.username = None;
        self.state = SessionState::LoggedOut;
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns whether the client has successfully logged in.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    /// Returns the username of the client if logged in.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the department of the client if logged in.
    pub fn department(&self) -> Option<&Department> {
        match &self.state {
            SessionState::LoggedIn(department) => Some(department),
            SessionState::LoggedOut => None,
        }
    }

    /// Like `department`, but fails with `NotLoggedIn` for a logged-out session.
    pub fn require_department(&self) -> Result<&Department, AuthError> {
        self.department().ok_or(AuthError::NotLoggedIn)
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Moves the session to LoggedIn.
    ///
    /// Typically set after successful credential validation.
    pub fn set_logged_in(&mut self, username: String, department: Department) {
        self.username = Some(username);
        self.state = SessionState::LoggedIn(department);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_logged_in());
        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert!(matches!(
            session.require_department(),
            Err(AuthError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = Session::default();
        session.set_logged_in("alice".into(), Department::new("AI", "ai"));
        assert!(session.is_logged_in());
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(session.require_department().unwrap().slug, "ai");

        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.username().is_none());
        assert!(session.department().is_none());
    }
}
