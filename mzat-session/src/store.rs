use std::fs;
use std::path::PathBuf;

use chrono::{serde::ts_seconds, DateTime, Utc};
use metazapp_api::{SessionError, SessionStore, User};
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// On-disk session document. Token and cached user live in one file so
/// they can never be observed half-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionData {
    token: String,
    user: User,
    #[serde(with = "ts_seconds")]
    saved_at: DateTime<Utc>,
}

/// File-backed [`SessionStore`] under the platform data directory.
///
/// Reads fail soft: a missing or malformed session file means signed out.
/// Writes go to a sibling temp file and are renamed into place.
pub struct FileSessionStore {
    session_path: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Result<Self, SetupError> {
        let data_dir = dirs::data_dir().expect("Always returns").join("mzat");

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                SetupError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        Ok(Self {
            session_path: data_dir.join("session.json"),
        })
    }

    /// Store rooted at an explicit directory instead of the platform data
    /// dir. Used by tests.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            session_path: dir.into().join("session.json"),
        }
    }

    fn read_session(&self) -> Option<SessionData> {
        let json = match fs::read_to_string(&self.session_path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session file: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring malformed session file: {}", e);
                None
            }
        }
    }

    fn write_session(&self, session: &SessionData) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(session)?;

        let tmp_path = self.session_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| SessionError::Storage(format!("Failed to write session: {}", e)))?;

        // Restrict to 0600 (read/write for owner only) before the file
        // becomes visible under the real name
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&tmp_path)
                .map_err(|e| {
                    SessionError::Storage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| {
                SessionError::Storage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.session_path)
            .map_err(|e| SessionError::Storage(format!("Failed to store session: {}", e)))?;

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError> {
        self.write_session(&SessionData {
            token: token.to_string(),
            user: user.clone(),
            saved_at: Utc::now(),
        })
    }

    fn clear_session(&self) -> Result<(), SessionError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path)
                .map_err(|e| SessionError::Storage(format!("Failed to delete session: {}", e)))?;
        }
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.read_session().map(|session| session.token)
    }

    fn cached_user(&self) -> Option<User> {
        self.read_session().map(|session| session.user)
    }

    fn update_cached_user(&self, user: &User) -> Result<(), SessionError> {
        if let Some(mut session) = self.read_session() {
            session.user = user.clone();
            self.write_session(&session)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@metazapp.com", name.to_lowercase()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_store() -> (tempfile::TempDir, FileSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_as_signed_out() {
        let (_dir, store) = test_store();

        assert!(store.token().is_none());
        assert!(store.cached_user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_session_roundtrip() {
        let (_dir, store) = test_store();

        store.set_session("abc", &test_user(1, "Demo")).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token().unwrap(), "abc");
        let cached = store.cached_user().unwrap();
        assert_eq!(cached.id, 1);
        assert_eq!(cached.name, "Demo");
        assert_eq!(cached.email, "demo@metazapp.com");
    }

    #[test]
    fn test_clear_session_is_idempotent() {
        let (_dir, store) = test_store();
        store.set_session("abc", &test_user(1, "Demo")).unwrap();

        store.clear_session().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.cached_user().is_none());

        // Clearing an already-empty store succeeds
        store.clear_session().unwrap();
    }

    #[test]
    fn test_malformed_file_reads_as_signed_out() {
        let (dir, store) = test_store();
        fs::write(dir.path().join("session.json"), "{not json").unwrap();

        assert!(store.token().is_none());
        assert!(store.cached_user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_update_cached_user_keeps_token() {
        let (_dir, store) = test_store();
        store.set_session("abc", &test_user(1, "Demo")).unwrap();

        let mut refreshed = test_user(1, "Demo");
        refreshed.name = "Demo Renamed".to_string();
        store.update_cached_user(&refreshed).unwrap();

        assert_eq!(store.token().unwrap(), "abc");
        assert_eq!(store.cached_user().unwrap().name, "Demo Renamed");
    }

    #[test]
    fn test_update_cached_user_without_session_is_noop() {
        let (dir, store) = test_store();

        store.update_cached_user(&test_user(1, "Demo")).unwrap();

        assert!(!dir.path().join("session.json").exists());
        assert!(store.cached_user().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = test_store();
        store.set_session("abc", &test_user(1, "Demo")).unwrap();

        let mode = fs::metadata(dir.path().join("session.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
