use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Failure category decided at the client boundary from the HTTP status
/// and the response envelope, so callers branch on a value instead of
/// inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials rejected on a public route (login).
    InvalidCredentials,
    /// The server refused the bearer token on a guarded route.
    InvalidToken,
    /// The request body failed server-side validation.
    Validation,
    /// Conflict with existing state (email already registered or taken).
    Conflict,
    /// The addressed resource does not exist.
    NotFound,
    /// Transport failure or an unparseable response body.
    Network,
    /// Anything else, including a 2xx envelope with `success == false`.
    Unknown,
}

impl ErrorKind {
    /// Classify a rejected response. `authenticated` marks routes guarded
    /// by the token middleware, where a 401 means the token was refused
    /// rather than credentials.
    pub fn from_status(status: StatusCode, authenticated: bool) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ErrorKind::Validation,
            StatusCode::UNAUTHORIZED if authenticated => ErrorKind::InvalidToken,
            StatusCode::UNAUTHORIZED => ErrorKind::InvalidCredentials,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            _ => ErrorKind::Unknown,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered and rejected the request.
    #[error("{message}")]
    Api {
        kind: ErrorKind,
        status: StatusCode,
        message: String,
    },

    /// The request never completed or the body was not valid JSON.
    #[error("Network error")]
    Network(#[source] reqwest::Error),

    /// The health endpoint could not be reached or gave no usable body.
    #[error("Server is not responding")]
    Unreachable(#[source] reqwest::Error),

    /// The session store failed while persisting a successful login.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Api { kind, .. } => *kind,
            ApiError::Network(_) | ApiError::Unreachable(_) => ErrorKind::Network,
            ApiError::Session(_) => ErrorKind::Unknown,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_status() {
        assert_eq!(
            ErrorKind::from_status(StatusCode::BAD_REQUEST, false),
            ErrorKind::Validation
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::NOT_FOUND, true),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::CONFLICT, false),
            ErrorKind::Conflict
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::INTERNAL_SERVER_ERROR, true),
            ErrorKind::Unknown
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::BAD_GATEWAY, false),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_unauthorized_depends_on_route_kind() {
        // 401 on login means the credentials were rejected
        assert_eq!(
            ErrorKind::from_status(StatusCode::UNAUTHORIZED, false),
            ErrorKind::InvalidCredentials
        );
        // 401 on a guarded route means the token was refused
        assert_eq!(
            ErrorKind::from_status(StatusCode::UNAUTHORIZED, true),
            ErrorKind::InvalidToken
        );
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = ApiError::Api {
            kind: ErrorKind::InvalidCredentials,
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    }

    #[test]
    fn test_session_error_maps_to_unknown() {
        let err = ApiError::Session(SessionError::Storage("disk full".to_string()));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "Session error: Session storage error: disk full");
    }
}
