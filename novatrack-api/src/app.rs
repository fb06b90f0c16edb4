/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use novatrack_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = novatrack_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use novatrack_shared::auth::jwt::{self, Role};
use sqlx::PgPool;
use std::sync::Arc;
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
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }
}

/// Authenticated operator identity injected into admin requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Token subject (account ID, or "operador" for the fallback operator)
    pub subject: String,

    /// Role claim carried by the session token
    pub role: Role,
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check (public)
/// ├── /tickets                 # Ticket resource
/// │   ├── GET    /             # List, newest first (public)
/// │   ├── POST   /             # Submit a ticket (public)
/// │   ├── GET    /stats        # Per-status counts (public)
/// │   ├── PUT    /:id          # Operator edit (admin session)
/// │   └── DELETE /:id          # Operator delete (admin session)
/// ├── /accounts
/// │   └── POST /register       # Provisioning-gated registration
/// └── /auth
///     └── POST /login          # Credential exchange for a session token
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public ticket surface: submission and the polled list.
    let public_ticket_routes = Router::new()
        .route(
            "/",
            get(routes::tickets::list_tickets).post(routes::tickets::create_ticket),
        )
        .route("/stats", get(routes::tickets::ticket_stats));

    // Admin ticket surface: mutations require a valid admin session token.
    let admin_ticket_routes = Router::new()
        .route(
            "/:id",
            put(routes::tickets::update_ticket).delete(routes::tickets::delete_ticket),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_auth_layer,
        ));

    let account_routes = Router::new().route("/register", post(routes::auth::register));
    let auth_routes = Router::new().route("/login", post(routes::auth::login));

    let cors = build_cors(&state.config.api.cors_origins);

    Router::new()
        .merge(health_routes)
        .nest(
            "/tickets",
            public_ticket_routes.merge(admin_ticket_routes),
        )
        .nest("/accounts", account_routes)
        .nest("/auth", auth_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
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

/// Admin session middleware
///
/// Extracts the bearer token from the Authorization header, validates it,
/// requires the admin role claim, and injects an [`AuthContext`] into the
/// request extensions. Handlers re-check the role from that context before
/// mutating anything.
async fn admin_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("No autorizado".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::Unauthorized("Se esperaba un token Bearer".to_string())
    })?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    if claims.role != Role::Admin {
        return Err(crate::error::ApiError::Unauthorized(
            "No autorizado".to_string(),
        ));
    }

    req.extensions_mut().insert(AuthContext {
        subject: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}
