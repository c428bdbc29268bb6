use axum::{
    Form, Json,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::constants::auth;
use crate::services::{AccessToken, AuthError, UserRecord};

// ============================================================================
// Request/Response Types
// ============================================================================

/// OAuth2 password-flow form body.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Active user resolved by [`auth_middleware`], available to protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Gate decision, attached to the extensions of every response on a
/// protected route. Routes without it are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    Rejected(&'static str),
}

impl AccessOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Rejected(kind) => kind,
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Access gate for protected routes.
///
/// 1. Extract the bearer token; a missing header is rejected with 401.
/// 2. Resolve it against the directory; unknown tokens are rejected with 401.
/// 3. Reject disabled accounts with 400, otherwise hand the user to the handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let span = tracing::Span::current();

    let decision = extract_bearer_token(&headers)
        .ok_or(AuthError::MissingToken)
        .and_then(|token| state.auth_service.authorize(token));

    let (outcome, mut response) = match decision {
        Ok(user) => {
            span.record("user_id", user.username.as_str());
            request.extensions_mut().insert(CurrentUser(user));
            (AccessOutcome::Granted, next.run(request).await)
        }
        Err(e) => {
            tracing::info!(reason = %e, "Rejected protected request");
            metrics::counter!("auth_rejections_total", "reason" => e.kind()).increment(1);
            (
                AccessOutcome::Rejected(e.kind()),
                ApiError::from(e).into_response(),
            )
        }
    };

    span.record("access", outcome.label());
    response.extensions_mut().insert(outcome);
    response
}

/// Parses `Authorization: <scheme> <token>`, splitting at the first space.
/// The scheme match is case-insensitive; an empty token counts as missing.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(auth::BEARER_SCHEME) {
        return None;
    }

    // Taken verbatim: padding becomes part of the token and fails to resolve
    (!token.is_empty()).then_some(token)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /token
/// Exchange username and password for a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state
        .auth_service
        .login(&form.username, &form.password)
        .inspect_err(|e| {
            metrics::counter!("logins_total", "outcome" => e.kind()).increment(1);
            tracing::info!("Failed login attempt");
        })?;

    metrics::counter!("logins_total", "outcome" => "success").increment(1);
    tracing::info!(user_id = %form.username, "Issued access token");

    Ok(Json(token))
}
