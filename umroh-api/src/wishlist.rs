use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Deserialize;
use umroh_core::User;
use uuid::Uuid;

use crate::{error::AppError, extract::AppQuery, parse_id, state::AppState, MessageResponse};

#[derive(Debug, Deserialize)]
struct WishlistQuery {
    package_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(list_wishlist).post(add_to_wishlist))
        .route("/wishlist/{package_id}", delete(remove_from_wishlist))
}

async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppQuery(query): AppQuery<WishlistQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let package_id = Uuid::parse_str(query.package_id.trim())
        .map_err(|_| AppError::ValidationError("Invalid package_id".to_string()))?;
    state.wishlist.add(&user, package_id).await?;
    Ok(Json(MessageResponse::new("Added to wishlist")))
}

async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(package_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let package_id = parse_id(&package_id, "Not found in wishlist")?;
    state.wishlist.remove(&user, package_id).await?;
    Ok(Json(MessageResponse::new("Removed from wishlist")))
}

async fn list_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Uuid>>, AppError> {
    Ok(Json(state.wishlist.list(&user).await?))
}
