use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use umroh_core::User;
use umroh_order::{Booking, NewBooking};

use crate::{error::AppError, extract::AppJson, parse_id, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<NewBooking>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.bookings.create_booking(&user, payload).await?))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list_user_bookings(&user).await?))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_id(&id, "Booking not found")?;
    Ok(Json(state.bookings.get_booking(&user, id).await?))
}
