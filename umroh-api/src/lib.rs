use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod packages;
pub mod payments;
pub mod session;
pub mod state;
pub mod wishlist;

pub use error::AppError;
pub use session::{EstablishedSession, SessionManager};
pub use state::AppState;

/// HTTP surface settings taken from the `api` and `cors` config sections.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub prefix: String,
    pub allowed_origins: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { prefix: "/api".to_string(), allowed_origins: vec!["*".to_string()] }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Malformed ids can never match a stored document, so they read as absent.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFoundError(not_found.to_string()))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static("x-session-id"),
        ])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn app(state: AppState, config: &RouterConfig) -> Router {
    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(bookings::routes())
        .merge(payments::routes())
        .merge(wishlist::routes())
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), middleware::require_session));

    let api = Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(packages::routes())
        .merge(protected);

    let prefix = config.prefix.trim_matches('/');
    let router = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", prefix), api)
    };

    router
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
