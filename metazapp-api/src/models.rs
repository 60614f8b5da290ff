use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform wrapper around every account-service response body.
///
/// `success == false` marks a failure regardless of the HTTP status; the
/// health endpoint is the only route that skips the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Server-supplied error message, with the generic fallback used when
    /// the service omits one.
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "An error occurred".to_string())
    }
}

/// Account record as served by the profile endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update; unset fields are left out of the request body
/// and untouched by the server.
#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `data` payload of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_without_message() {
        let json = r#"{
            "success": true,
            "data": {
                "user": {
                    "id": 1,
                    "name": "Demo",
                    "email": "demo@metazapp.com",
                    "created_at": "2024-01-15T10:30:00Z",
                    "updated_at": "2024-01-15T10:30:00Z"
                },
                "token": "abc"
            }
        }"#;

        let envelope: Envelope<AuthResponse> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, "");

        let auth = envelope.data.unwrap();
        assert_eq!(auth.token, "abc");
        assert_eq!(auth.user.id, 1);
        assert_eq!(auth.user.name, "Demo");
        assert_eq!(auth.user.email, "demo@metazapp.com");
    }

    #[test]
    fn test_failure_envelope_error_message() {
        let json = r#"{"success": false, "message": "Error", "error": "invalid token"}"#;

        let envelope: Envelope<User> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error_message(), "invalid token");
    }

    #[test]
    fn test_failure_envelope_falls_back_to_generic_message() {
        let json = r#"{"success": false, "message": "Error"}"#;

        let envelope: Envelope<User> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error_message(), "An error occurred");
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let update = UpdateProfileRequest {
            name: Some("New Name".to_string()),
            email: None,
        };

        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"New Name"}"#);

        let empty = UpdateProfileRequest::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }
}
