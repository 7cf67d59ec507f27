use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use umroh_core::User;

use crate::{error::AppError, middleware::bearer_token, state::AppState, MessageResponse};

const SESSION_ID_HEADER: &str = "X-Session-ID";

#[derive(Debug, Serialize)]
struct UserProfile {
    id: String,
    email: String,
    name: String,
    picture: Option<String>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    user: UserProfile,
    session_token: String,
}

/// Routes reachable without a session.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", post(logout))
}

/// Routes behind `require_session`.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::ValidationError("Session ID required".to_string()))?;

    let established = state.sessions.establish_session(session_id).await?;
    let user = established.user;

    Ok(Json(SessionResponse {
        user: UserProfile { id: user.id, email: user.email, name: user.name, picture: user.picture },
        session_token: established.session_token,
    }))
}

async fn me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    state.sessions.revoke_session(bearer_token(&headers)).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
