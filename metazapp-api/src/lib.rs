mod error;
pub mod models;
pub mod session;

pub use crate::error::{ApiError, ErrorKind};
pub use crate::models::{
    AuthResponse, Envelope, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
};
pub use crate::session::{MemorySessionStore, SessionError, SessionStore};
pub use reqwest::StatusCode;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Client for the Metazapp account service.
///
/// Holds the session store it was built with: `login`/`register` persist
/// the returned session before reporting success, `logout` clears it, and
/// every request picks up the stored bearer token automatically.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl Client {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, session)
    }

    pub fn with_base_url(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    /// Exchange credentials for a session. On success the token and user
    /// are persisted before this returns, so a caller observing `Ok` can
    /// rely on `is_authenticated()`.
    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let auth: AuthResponse = self
            .send(self.http.post(&url).json(&credentials), false)
            .await?;
        self.session.set_session(&auth.token, &auth.user)?;
        Ok(auth)
    }

    /// Create an account and sign it in; persists the session like
    /// [`login`](Self::login).
    pub async fn register(&self, new_user: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/auth/register", self.base_url);
        let auth: AuthResponse = self
            .send(self.http.post(&url).json(&new_user), false)
            .await?;
        self.session.set_session(&auth.token, &auth.user)?;
        Ok(auth)
    }

    /// Fetch the live profile. No session mutation here; callers own
    /// cache reconciliation.
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let url = format!("{}/profile", self.base_url);
        self.send(self.http.get(&url), true).await
    }

    /// Update name and/or email. Like [`get_profile`](Self::get_profile),
    /// leaves the session untouched.
    pub async fn update_profile(&self, changes: UpdateProfileRequest) -> Result<User, ApiError> {
        let url = format!("{}/profile", self.base_url);
        self.send(self.http.put(&url).json(&changes), true).await
    }

    /// Drop the local session. No network call is involved, and a storage
    /// failure is logged rather than surfaced so logout always completes.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear_session() {
            tracing::warn!("Failed to clear session on logout: {}", e);
        }
    }

    /// Probe the service. The health endpoint lives outside the API prefix
    /// and skips the response envelope, so the body is returned raw.
    pub async fn health_check(&self) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/health", service_root(&self.base_url));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Unreachable)?;
        response.json().await.map_err(ApiError::Unreachable)
    }

    /// Attach the bearer token when one is stored, send, and unwrap the
    /// service envelope into its `data`. `authenticated` marks routes
    /// guarded by the token middleware, which changes how a 401 is read.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let mut request = request.header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let envelope = response.json::<Envelope<T>>().await?;

        if !status.is_success() || !envelope.success {
            let kind = if status.is_success() {
                ErrorKind::Unknown
            } else {
                ErrorKind::from_status(status, authenticated)
            };
            return Err(ApiError::Api {
                kind,
                status,
                message: envelope.error_message(),
            });
        }

        let message = envelope.error_message();
        envelope.data.ok_or(ApiError::Api {
            kind: ErrorKind::Unknown,
            status,
            message,
        })
    }
}

/// Base URL with the trailing `/api` prefix stripped; the health endpoint
/// is mounted on the service root.
fn service_root(base_url: &str) -> &str {
    base_url.strip_suffix("/api").unwrap_or(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_root_strips_api_suffix() {
        assert_eq!(service_root("http://localhost:8080/api"), "http://localhost:8080");
        assert_eq!(
            service_root("https://accounts.metazapp.com/api"),
            "https://accounts.metazapp.com"
        );
    }

    #[test]
    fn test_service_root_leaves_other_urls_alone() {
        assert_eq!(service_root("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(service_root("http://localhost:8080/v1"), "http://localhost:8080/v1");
    }
}
