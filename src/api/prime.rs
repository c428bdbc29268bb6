use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, MessageResponse};
use crate::services::PrimeCheck;

/// GET /prime/{number}
/// Non-numeric input is answered with 200 and an explanatory message.
/// The check runs on the blocking pool so large inputs never hold a worker.
pub async fn check_prime(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let max_digits = state.config().server.max_prime_digits;

    let outcome = tokio::task::spawn_blocking(move || PrimeCheck::evaluate(&number, max_digits))
        .await
        .map_err(|e| ApiError::internal(format!("Prime check task failed: {e}")))??;

    Ok(Json(MessageResponse::new(outcome.to_string())))
}
