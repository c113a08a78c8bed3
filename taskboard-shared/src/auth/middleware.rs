/// Request authentication helpers
///
/// Extracts the session token from the `Authorization: Bearer <token>` header,
/// validates it and checks it has not been revoked by a logout. The resulting
/// [`AuthContext`] is what route handlers receive.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use taskboard_shared::auth::jwt::{create_token, default_session_ttl, Claims};
/// use taskboard_shared::auth::middleware::{authenticate, SessionRegistry};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let token = create_token(&Claims::new("maria", default_session_ttl()), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
///
/// let sessions = SessionRegistry::default();
/// let auth = authenticate(&headers, secret, &sessions).await?;
/// assert_eq!(auth.username, "maria");
/// # Ok(())
/// # }
/// ```

use axum::http::{header, HeaderMap};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authentication context added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated username
    pub username: String,

    /// Session id from the token
    pub session_id: Uuid,

    /// Token expiry (Unix timestamp)
    pub expires_at: i64,
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Session was logged out
    #[error("Session has been revoked")]
    Revoked,
}

/// Sessions revoked by logout, keyed by session id with the token's expiry
///
/// Cheap to clone; all clones share the same map. An expired token is
/// rejected by validation anyway, so its entry is dropped on the next revoke.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    revoked: Arc<RwLock<HashMap<Uuid, i64>>>,
}

impl SessionRegistry {
    pub async fn revoke(&self, session_id: Uuid, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session_id, expires_at);

        tracing::debug!(%session_id, tracked = revoked.len(), "Session revoked");
    }

    pub async fn is_revoked(&self, session_id: Uuid) -> bool {
        self.revoked.read().await.contains_key(&session_id)
    }

    /// Number of revocations still being tracked
    pub async fn revoked_count(&self) -> usize {
        self.revoked.read().await.len()
    }
}

/// Authenticates a request from its headers
///
/// # Errors
///
/// - `MissingCredentials` if there is no `Authorization` header
/// - `InvalidFormat` if it is not a Bearer token
/// - `InvalidToken` if the signature, issuer or expiry check fails
/// - `Revoked` if the session was logged out
pub async fn authenticate(
    headers: &HeaderMap,
    secret: &str,
    sessions: &SessionRegistry,
) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        other => AuthError::InvalidToken(other.to_string()),
    })?;

    if sessions.is_revoked(claims.sid).await {
        return Err(AuthError::Revoked);
    }

    Ok(AuthContext {
        username: claims.sub,
        session_id: claims.sid,
        expires_at: claims.exp,
    })
}
