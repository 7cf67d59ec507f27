use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::warn;
use umroh_catalog::{NewPackage, Package, PackageFilter, SeedOutcome};

use crate::{error::AppError, extract::{AppJson, AppQuery}, parse_id, state::AppState, MessageResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/packages", get(list_packages).post(create_package))
        .route("/packages/{id}", get(get_package))
        .route("/seed", post(seed))
}

async fn list_packages(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<PackageFilter>,
) -> Result<Json<Vec<Package>>, AppError> {
    Ok(Json(state.catalog.list_packages(&filter).await?))
}

async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Package>, AppError> {
    let id = parse_id(&id, "Package not found")?;
    Ok(Json(state.catalog.get_package(id).await?))
}

// Open to anonymous callers; restrict at the edge if needed.
async fn create_package(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewPackage>,
) -> Result<Json<Package>, AppError> {
    let package = state.catalog.create_package(payload).await?;
    warn!("Package {} created through unauthenticated endpoint", package.id);
    Ok(Json(package))
}

async fn seed(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let message = match state.catalog.seed().await? {
        SeedOutcome::Seeded(count) => format!("Seeded {} packages", count),
        SeedOutcome::AlreadySeeded => "Data already seeded".to_string(),
    };
    Ok(Json(MessageResponse::new(message)))
}
