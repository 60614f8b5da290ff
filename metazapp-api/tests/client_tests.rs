//! Integration tests for the account-service client.
//!
//! Each test stands up a local mock server, points a `Client` at it with
//! the `/api` prefix appended, and checks the request shape, the envelope
//! handling, and the session-store side effects.

use std::sync::Arc;

use metazapp_api::{
    Client, ErrorKind, LoginRequest, MemorySessionStore, RegisterRequest, SessionStore,
    UpdateProfileRequest, User,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn demo_user() -> User {
    User {
        id: 1,
        name: "Demo User".to_string(),
        email: "demo@metazapp.com".to_string(),
        created_at: "2024-01-15T10:30:00Z".parse().unwrap(),
        updated_at: "2024-01-15T10:30:00Z".parse().unwrap(),
    }
}

fn user_json(name: &str, email: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": name,
        "email": email,
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-03-02T08:00:00Z"
    })
}

fn success_body(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "message": "OK", "data": data })
}

fn failure_body(error: &str) -> serde_json::Value {
    json!({ "success": false, "message": "Error", "error": error })
}

/// Client wired to the mock server the way the app wires it to the real
/// service: base URL carries the `/api` prefix.
fn client_against(server: &MockServer) -> (Client, Arc<MemorySessionStore>) {
    let session = Arc::new(MemorySessionStore::new());
    let client = Client::with_base_url(format!("{}/api", server.uri()), session.clone());
    (client, session)
}

#[tokio::test]
async fn test_login_persists_session_before_returning() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);

    let body = success_body(json!({
        "user": user_json("Demo User", "demo@metazapp.com"),
        "token": "secret-token"
    }));
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let auth = client
        .login(LoginRequest {
            email: "demo@metazapp.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.token, "secret-token");
    assert_eq!(auth.user.name, "Demo User");

    // By the time login returns Ok, the session is already on record
    assert!(session.is_authenticated());
    assert_eq!(session.token().unwrap(), "secret-token");
    assert_eq!(session.cached_user().unwrap().email, "demo@metazapp.com");
}

#[tokio::test]
async fn test_login_rejection_maps_to_invalid_credentials() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(failure_body("Invalid email or password")),
        )
        .mount(&server)
        .await;

    let err = client
        .login(LoginRequest {
            email: "demo@metazapp.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_persists_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);

    let body = success_body(json!({
        "user": user_json("New User", "new@metazapp.com"),
        "token": "fresh-token"
    }));
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let auth = client
        .register(RegisterRequest {
            name: "New User".to_string(),
            email: "new@metazapp.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.user.email, "new@metazapp.com");
    assert_eq!(session.token().unwrap(), "fresh-token");
    assert_eq!(session.cached_user().unwrap().name, "New User");
}

#[tokio::test]
async fn test_register_conflict_maps_to_conflict() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(failure_body("User with this email already exists")),
        )
        .mount(&server)
        .await;

    let err = client
        .register(RegisterRequest {
            name: "Demo User".to_string(),
            email: "demo@metazapp.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "User with this email already exists");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_profile_request_carries_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);
    session.set_session("secret-token", &demo_user()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(user_json("Demo User", "demo@metazapp.com"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client.get_profile().await.unwrap();
    assert_eq!(user.name, "Demo User");
}

#[tokio::test]
async fn test_rejected_token_maps_to_invalid_token_and_keeps_store() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);
    session.set_session("stale-token", &demo_user()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(failure_body("Invalid or expired token")),
        )
        .mount(&server)
        .await;

    let err = client.get_profile().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidToken);
    assert_eq!(err.to_string(), "Invalid or expired token");
    // Discarding the rejected session is the caller's decision, not the client's
    assert!(session.is_authenticated());
    assert!(session.cached_user().is_some());
}

#[tokio::test]
async fn test_update_profile_sends_only_changed_fields() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);
    session.set_session("secret-token", &demo_user()).unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/profile"))
        .and(body_json(json!({ "name": "Renamed" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(user_json("Renamed", "demo@metazapp.com"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .update_profile(UpdateProfileRequest {
            name: Some("Renamed".to_string()),
            email: None,
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Renamed");
    // The cached copy is reconciled by the caller, not by the client
    assert_eq!(session.cached_user().unwrap().name, "Demo User");
}

#[tokio::test]
async fn test_validation_rejection_maps_to_validation() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);
    session.set_session("secret-token", &demo_user()).unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(failure_body("Please provide a valid email address")),
        )
        .mount(&server)
        .await;

    let err = client
        .update_profile(UpdateProfileRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Please provide a valid email address");
}

#[tokio::test]
async fn test_failure_envelope_with_ok_status_maps_to_unknown() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, session) = client_against(&server);
    session.set_session("secret-token", &demo_user()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(failure_body("Something went wrong")),
        )
        .mount(&server)
        .await;

    let err = client.get_profile().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(err.to_string(), "Something went wrong");
}

#[tokio::test]
async fn test_health_check_hits_service_root() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let (client, _session) = client_against(&server);

    // Mounted at /health, not /api/health, and served without the envelope
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ok", "service": "metazapp-accounts" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let value = client.health_check().await.unwrap();
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn test_health_check_reports_unreachable_server() {
    let session = Arc::new(MemorySessionStore::new());
    // Discard port; nothing listens here
    let client = Client::with_base_url("http://127.0.0.1:9/api", session);

    let err = client.health_check().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.to_string(), "Server is not responding");
}
