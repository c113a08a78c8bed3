/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::store::Store;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Store::new(), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use taskboard_shared::auth::middleware::{authenticate, SessionRegistry};
use taskboard_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Board state for every user
    pub store: Arc<Store>,

    /// Sessions revoked by logout
    pub sessions: SessionRegistry,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            sessions: SessionRegistry::default(),
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                          # public
/// └── /v1/
///     ├── POST /auth/login                  # public
///     ├── POST /auth/logout
///     ├── POST /auth/change_password
///     ├── GET  /dashboard
///     ├── POST /projects
///     ├── POST /projects/:project_id/select
///     ├── PUT  /projects/current
///     ├── GET  /projects/current/export
///     ├── POST /tasks
///     ├── POST /tasks/move
///     ├── GET  /tasks/:task_id
///     ├── GET|POST /tasks/:task_id/comments
///     ├── POST /tasks/:task_id/reactions
///     ├── GET  /notifications
///     ├── POST /notifications/:id/read
///     ├── POST /notifications/read_all
///     ├── GET  /rankings
///     ├── GET  /stats/:period
///     ├── GET|PUT /settings
///     └── GET|PUT|DELETE /avatar
/// ```
///
/// Everything under `/v1` except login requires a session token.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let protected_routes = Router::new()
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/change_password", post(routes::auth::change_password))
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/projects", post(routes::projects::create_project))
        .route("/projects/:project_id/select", post(routes::projects::select_project))
        .route("/projects/current", put(routes::projects::update_project))
        .route("/projects/current/export", get(routes::projects::export_project))
        .route("/tasks", post(routes::tasks::add_task))
        .route("/tasks/move", post(routes::tasks::move_task))
        .route("/tasks/:task_id", get(routes::tasks::task_details))
        .route(
            "/tasks/:task_id/comments",
            get(routes::tasks::list_comments).post(routes::tasks::add_comment),
        )
        .route("/tasks/:task_id/reactions", post(routes::tasks::add_reaction))
        .route("/notifications", get(routes::notifications::list_notifications))
        .route("/notifications/read_all", post(routes::notifications::mark_all_read))
        .route("/notifications/:id/read", post(routes::notifications::mark_read))
        .route("/rankings", get(routes::rankings::rankings))
        .route("/stats/:period", get(routes::rankings::activity))
        .route(
            "/settings",
            get(routes::account::get_settings).put(routes::account::update_settings),
        )
        .route(
            "/avatar",
            get(routes::account::get_avatar)
                .put(routes::account::set_avatar)
                .delete(routes::account::remove_avatar),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// CORS policy from configuration
///
/// `*` yields a permissive policy for local development; otherwise only the
/// listed origins are allowed.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Session authentication middleware layer
///
/// Validates the bearer token, rejects logged-out sessions and injects
/// [`AuthContext`](taskboard_shared::auth::middleware::AuthContext) into
/// request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth = authenticate(req.headers(), state.jwt_secret(), &state.sessions).await?;
    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}
