use axum::{
    body::Body,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::constants::messages;

/// Multipart field carrying the picture.
const UPLOAD_FIELD: &str = "img";

/// POST /picture/invert
/// Returns the uploaded picture with inverted colors as `image/jpeg`
pub async fn invert_picture(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload.ok_or_else(|| ApiError::bad_request(messages::INVALID_IMAGE))?;
    tracing::debug!(size = bytes.len(), "Received picture upload");

    let image_service = state.image_service;
    let inverted = tokio::task::spawn_blocking(move || image_service.invert(&bytes))
        .await
        .map_err(|e| ApiError::internal(format!("Image task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], Body::from(inverted)).into_response())
}
