/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An in-memory store seeded with one user per role
/// - Session token generation
/// - Request helpers that drive the router in-process

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::auth::jwt::{create_token, default_session_ttl, Claims};
use taskboard_shared::models::user::{CreateUser, Role};
use taskboard_shared::store::Store;
use tower::Service as _;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
}

impl TestContext {
    /// Creates a context with `admin`, `maria` (member) and `juan` (guest)
    ///
    /// Password hashes are placeholders; tests mint tokens directly instead of
    /// logging in.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        })?;

        let store = Store::new();
        for (username, role) in [
            ("admin", Role::Admin),
            ("maria", Role::Member),
            ("juan", Role::Guest),
        ] {
            store
                .add_user(CreateUser {
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    role,
                    password_hash: "test_hash".to_string(), // Not used in tests
                })
                .await?;
        }

        let state = AppState::new(store, config);
        let app = build_router(state.clone());

        Ok(TestContext { app, state })
    }

    /// Mints a session token for a user
    pub fn token_for(&self, username: &str) -> String {
        let claims = Claims::new(username, default_session_ttl());
        create_token(&claims, TEST_SECRET).expect("Failed to create token")
    }

    /// Sends a request and returns the status and JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }

    /// Shorthand for an authenticated request as `username`
    pub async fn send_as(
        &self,
        username: &str,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = self.token_for(username);
        self.send(method, uri, Some(&token), body).await
    }
}
