use std::sync::Arc;

use tokio::sync::mpsc;

use metazapp_api::{
    ApiError, Client, ErrorKind, LoginRequest, RegisterRequest, SessionStore, UpdateProfileRequest,
};

use crate::events::DataEvent;

/// Runs API requests off the UI loop and reports results as [`DataEvent`]s.
/// Profile loads are cache-first: the stored copy renders immediately and
/// the server response reconciles it.
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub session: Arc<dyn SessionStore>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(
        api_client: Arc<Client>,
        session: Arc<dyn SessionStore>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client,
            session,
            data_tx,
        }
    }

    /// Sign in and, on success, kick off the first profile load
    pub async fn login(&self, credentials: LoginRequest) {
        tracing::info!("Signing in as {}", credentials.email);

        match self.api_client.login(credentials).await {
            Ok(auth) => {
                tracing::info!("Signed in as user {}", auth.user.id);
                let _ = self.data_tx.send(DataEvent::LoggedIn { user: auth.user });

                // The dashboard shows the cached copy instantly, then the
                // fresh profile once this request lands
                self.load_profile(false).await;
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                let _ = self.data_tx.send(DataEvent::LoginFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Create an account and, on success, kick off the first profile load
    pub async fn register(&self, new_user: RegisterRequest) {
        tracing::info!("Registering {}", new_user.email);

        match self.api_client.register(new_user).await {
            Ok(auth) => {
                tracing::info!("Registered user {}", auth.user.id);
                let _ = self.data_tx.send(DataEvent::Registered { user: auth.user });
                self.load_profile(false).await;
            }
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                let _ = self.data_tx.send(DataEvent::RegisterFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Load the profile with cache-first rendering
    pub async fn load_profile(&self, force_refresh: bool) {
        tracing::info!("Loading profile (force_refresh={})", force_refresh);

        // Step 1: cached copy renders immediately (fast path)
        if !force_refresh {
            if let Some(user) = self.session.cached_user() {
                tracing::debug!("Loaded cached profile for user {}", user.id);
                let _ = self.data_tx.send(DataEvent::ProfileCacheLoaded { user });
            } else {
                tracing::debug!("No cached profile found");
            }
        }

        // Step 2: reconcile against the server
        match self.api_client.get_profile().await {
            Ok(user) => {
                tracing::info!("Loaded profile from API");
                if let Err(e) = self.session.update_cached_user(&user) {
                    tracing::warn!("Failed to cache profile: {}", e);
                }
                let _ = self.data_tx.send(DataEvent::ProfileLoaded { user });
            }
            Err(e) => {
                tracing::error!("Failed to load profile: {}", e);
                self.discard_rejected_session(&e);
                let _ = self.data_tx.send(DataEvent::ProfileLoadFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Submit profile changes
    pub async fn update_profile(&self, changes: UpdateProfileRequest) {
        tracing::info!("Updating profile");

        match self.api_client.update_profile(changes).await {
            Ok(user) => {
                tracing::info!("Profile updated");
                if let Err(e) = self.session.update_cached_user(&user) {
                    tracing::warn!("Failed to cache profile: {}", e);
                }
                let _ = self.data_tx.send(DataEvent::ProfileUpdated { user });
            }
            Err(e) => {
                tracing::error!("Failed to update profile: {}", e);
                self.discard_rejected_session(&e);
                let _ = self.data_tx.send(DataEvent::ProfileUpdateFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Drops the stored session once the server has refused its token, so
    /// the next start doesn't retry a token we know is dead.
    fn discard_rejected_session(&self, error: &ApiError) {
        if error.kind() == ErrorKind::InvalidToken {
            tracing::warn!("Stored token rejected by server, clearing session");
            self.api_client.logout();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use metazapp_api::{MemorySessionStore, StatusCode, User};

    fn test_user() -> User {
        User {
            id: 1,
            name: "Demo User".to_string(),
            email: "demo@metazapp.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn loader_with_session() -> (DataLoader, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        store.set_session("token-1", &test_user()).unwrap();

        let session: Arc<dyn SessionStore> = store.clone();
        let api_client = Arc::new(Client::with_base_url(
            "http://127.0.0.1:9/api",
            session.clone(),
        ));
        let (data_tx, _data_rx) = mpsc::unbounded_channel();

        (DataLoader::new(api_client, session, data_tx), store)
    }

    #[test]
    fn rejected_token_clears_session() {
        let (loader, store) = loader_with_session();

        let error = ApiError::Api {
            kind: ErrorKind::InvalidToken,
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid or expired token".to_string(),
        };
        loader.discard_rejected_session(&error);

        assert!(!store.is_authenticated());
        assert!(store.cached_user().is_none());
    }

    #[test]
    fn other_errors_keep_session() {
        let (loader, store) = loader_with_session();

        let error = ApiError::Api {
            kind: ErrorKind::Validation,
            status: StatusCode::BAD_REQUEST,
            message: "Name cannot be empty".to_string(),
        };
        loader.discard_rejected_session(&error);

        assert!(store.is_authenticated());
    }
}
