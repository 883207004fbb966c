//! Session registry
//!
//! Keeps logged-in sessions in memory, keyed by an opaque random token that
//! travels in a cookie. Entries expire after a fixed TTL and are pruned lazily.

use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::Session;

struct SessionEntry {
    session: Session,
    expires_at: Instant,
}

/// Registry for tracking active sessions
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores `session` under a fresh token and returns the token.
    pub async fn insert(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            token.clone(),
            SessionEntry {
                session,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    /// Looks up the session for a cookie value, if one was presented.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Session, SessionError> {
        let token = token.ok_or(SessionError::MissingCookie)?;

        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(entry.session.clone()),
            Some(_) => {
                debug!("Dropping expired session");
                sessions.remove(token);
                Err(SessionError::Expired)
            }
            None => Err(SessionError::Expired),
        }
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token).map(|entry| entry.session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Department;

    fn logged_in() -> Session {
        let mut session = Session::default();
        session.set_logged_in("alice".into(), Department::new("AI", "ai"));
        session
    }

    #[tokio::test]
    async fn test_insert_and_resolve() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let token = registry.insert(logged_in()).await;

        let session = registry.resolve(Some(&token)).await.unwrap();
        assert_eq!(session.username(), Some("alice"));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let first = registry.insert(logged_in()).await;
        let second = registry.insert(logged_in()).await;
        assert_ne!(first, second);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_and_unknown_tokens() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        assert!(matches!(
            registry.resolve(None).await,
            Err(SessionError::MissingCookie)
        ));
        assert!(matches!(
            registry.resolve(Some("forged")).await,
            Err(SessionError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let registry = SessionRegistry::new(Duration::from_millis(10));
        let token = registry.insert(logged_in()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        let err = registry.resolve(Some(&token)).await.unwrap_err();
        assert!(!err.to_string().contains(&token));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let token = registry.insert(logged_in()).await;

        assert!(registry.remove(&token).await.is_some());
        assert!(registry.remove(&token).await.is_none());
        assert!(registry.resolve(Some(&token)).await.is_err());
    }
}
