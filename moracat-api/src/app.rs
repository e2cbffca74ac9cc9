//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use moracat_api::{app::{build_router, AppState}, config::Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState::new(config);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::Config,
    error::ApiError,
    middleware::security::SecurityHeadersLayer,
    storage::{LocalLogoStorage, LogoStorage, PUBLIC_PREFIX},
};
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use moracat_shared::{
    auth::{context::AuthContext, session},
    db::store::MemStore,
    models::user::User,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Room for multipart boundaries and headers around an uploaded file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
///
/// Cloned into every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: MemStore,
    pub config: Arc<Config>,
    pub logos: Arc<dyn LogoStorage>,
}

impl AppState {
    /// Creates state with an empty store and logos kept on local disk
    pub fn new(config: Config) -> Self {
        let logos = Arc::new(LocalLogoStorage::new(config.uploads.dir.clone()));
        Self::with_logo_storage(config, logos)
    }

    pub fn with_logo_storage(config: Config, logos: Arc<dyn LogoStorage>) -> Self {
        Self {
            store: MemStore::new(),
            config: Arc::new(config),
            logos,
        }
    }

    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// ├── GET  /uploads/*                 # stored logos
/// └── /api/
///     ├── POST  /register             # public
///     ├── POST  /login                # public
///     ├── POST  /waitlist             # public
///     ├── GET   /plans                # public
///     ├── POST  /quote                # public
///     ├── POST  /logout               # session
///     ├── GET   /user                 # session
///     ├── GET|POST /pets              # session
///     ├── GET   /pets/:id             # session, owner
///     ├── GET|POST /subscriptions     # session
///     ├── GET|PATCH /subscriptions/:id  # session, owner
///     ├── POST  /upload/logo          # session
///     └── /admin/                     # session, admin
///         ├── GET   /users
///         ├── PATCH /users/:id
///         ├── GET   /waitlist
///         └── GET   /subscriptions
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/waitlist", post(routes::waitlist::join_waitlist))
        .route("/plans", get(routes::pricing::list_plans))
        .route("/quote", post(routes::pricing::quote));

    let admin_routes = Router::new()
        .route("/users", get(routes::admin::list_users))
        .route("/users/:id", axum::routing::patch(routes::admin::update_user))
        .route("/waitlist", get(routes::admin::list_waitlist))
        .route("/subscriptions", get(routes::admin::list_subscriptions));

    let session_routes = Router::new()
        .route("/logout", post(routes::auth::logout))
        .route("/user", get(routes::auth::current_user))
        .route(
            "/pets",
            get(routes::pets::list_pets).post(routes::pets::create_pet),
        )
        .route("/pets/:id", get(routes::pets::get_pet))
        .route(
            "/subscriptions",
            get(routes::subscriptions::list_subscriptions)
                .post(routes::subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/:id",
            get(routes::subscriptions::get_subscription)
                .patch(routes::subscriptions::update_subscription),
        )
        .route(
            "/upload/logo",
            post(routes::upload::upload_logo).layer(DefaultBodyLimit::max(
                state.config.uploads.max_bytes + MULTIPART_OVERHEAD,
            )),
        )
        .nest("/admin", admin_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let api_routes = Router::new().merge(public_routes).merge(session_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
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
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&state.config.uploads.dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Finds the session token in the cookie, falling back to a Bearer header
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session::token_from_cookie_header);

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
    })
}

/// Session authentication middleware
///
/// Validates the session token, rejects revoked sessions and sessions whose
/// user no longer exists, then injects [`AuthContext`] into the request.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized("Unauthorized".to_string());

    let token = session_token(req.headers()).ok_or_else(unauthorized)?;
    let claims = session::validate_session_token(token, state.session_secret())?;

    if session::is_revoked(&state.store, claims.jti)? {
        tracing::debug!(session_id = %claims.jti, "Rejected revoked session");
        return Err(unauthorized());
    }

    let user = User::find_by_id(&state.store, claims.sub)?.ok_or_else(unauthorized)?;

    req.extensions_mut()
        .insert(AuthContext::from_session(&claims, &user));

    Ok(next.run(req).await)
}
