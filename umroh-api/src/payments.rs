use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use umroh_core::User;
use umroh_order::{NewPayment, Payment};

use crate::{error::AppError, extract::AppJson, parse_id, state::AppState, MessageResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/{id}", get(get_payment))
        .route("/payments/{id}/complete", post(complete_payment))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<NewPayment>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.payments.create_payment(&user, payload).await?))
}

async fn complete_payment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "Payment not found")?;
    state.payments.complete_payment(&user, id).await?;
    Ok(Json(MessageResponse::new("Payment completed successfully")))
}

async fn get_payment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, AppError> {
    let id = parse_id(&id, "Payment not found")?;
    Ok(Json(state.payments.get_payment(&user, id).await?))
}
