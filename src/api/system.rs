//! Welcome and time endpoints.

use axum::{Extension, Json};
use chrono::{DateTime, Local};

use super::MessageResponse;
use super::auth::CurrentUser;
use crate::constants::messages;

/// `GET /`
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(messages::WELCOME))
}

/// Returns the server's current local time.
///
/// # Endpoint
/// `GET /gettime` (bearer token required)
pub async fn get_time(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<DateTime<Local>> {
    let now = Local::now();
    tracing::debug!(user_id = %user.username, %now, "Serving current time");
    Json(now)
}
