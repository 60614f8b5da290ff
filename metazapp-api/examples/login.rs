use std::sync::Arc;

use metazapp_api::{ApiError, Client, LoginRequest, MemorySessionStore, SessionStore};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let session = Arc::new(MemorySessionStore::new());
    let client = Client::new(session.clone());

    let health = client.health_check().await?;
    println!("health: {health}");

    let auth = client
        .login(LoginRequest {
            email: "demo@metazapp.com".to_string(),
            password: "password".to_string(),
        })
        .await?;
    println!("logged in as {} <{}>", auth.user.name, auth.user.email);

    let profile = client.get_profile().await?;
    println!("member since {}", profile.created_at);

    client.logout();
    println!("authenticated after logout: {}", session.is_authenticated());

    Ok(())
}
