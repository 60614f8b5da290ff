use std::sync::RwLock;

use thiserror::Error;

use crate::models::User;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read/write authority over the persisted session: the token and the
/// cached user, treated as one unit.
///
/// Injected as `Arc<dyn SessionStore>` into the [`Client`](crate::Client)
/// and the application so tests can substitute their own store.
/// Implementations must never let a reader observe the token without the
/// user or vice versa.
pub trait SessionStore: Send + Sync {
    /// Persist token and user together.
    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError>;

    /// Remove both entries. Succeeds when no session exists.
    fn clear_session(&self) -> Result<(), SessionError>;

    /// Currently persisted token, if any.
    fn token(&self) -> Option<String>;

    /// Cached user record; absent when missing or unreadable.
    fn cached_user(&self) -> Option<User>;

    /// Replace only the cached user, keeping the token. A call without an
    /// active session is a no-op.
    fn update_cached_user(&self, user: &User) -> Result<(), SessionError>;

    /// A token is present. Says nothing about whether the server still
    /// accepts it.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-local session store for tests and embedding.
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<(String, User)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let mut session = self.session.write().unwrap();
        *session = Some((token.to_string(), user.clone()));
        Ok(())
    }

    fn clear_session(&self) -> Result<(), SessionError> {
        let mut session = self.session.write().unwrap();
        *session = None;
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|(token, _)| token.clone())
    }

    fn cached_user(&self) -> Option<User> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|(_, user)| user.clone())
    }

    fn update_cached_user(&self, user: &User) -> Result<(), SessionError> {
        let mut session = self.session.write().unwrap();
        if let Some((_, cached)) = session.as_mut() {
            *cached = user.clone();
        }
        Ok(())
    }
}
