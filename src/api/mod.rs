use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{AuthService, DirectoryAuthService, ImageService, UserDirectory};

pub mod auth;
mod error;
mod observability;
mod picture;
mod prime;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub auth_service: Arc<dyn AuthService>,

    pub image_service: ImageService,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Builds the immutable directory from `config` and wires the services.
pub fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let directory = Arc::new(
        UserDirectory::from_entries(&config.users)
            .map_err(|e| anyhow::anyhow!("Failed to build user directory: {e}"))?,
    );
    tracing::info!(users = directory.len(), "User directory loaded");

    let auth_service: Arc<dyn AuthService> = Arc::new(DirectoryAuthService::new(directory));

    Ok(Arc::new(AppState {
        config: Arc::new(config),
        auth_service,
        image_service: ImageService::new(),
        prometheus_handle,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let cors_layer = if server.cors_allowed_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let protected_routes = create_protected_router(state.clone());

    Router::new()
        .merge(protected_routes)
        .route("/", get(system::welcome))
        .route("/token", post(auth::login))
        .route("/prime/{number}", get(prime::check_prime))
        .route(
            "/picture/invert",
            post(picture::invert_picture)
                .layer(DefaultBodyLimit::max(server.max_upload_bytes)),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::request_telemetry))
        .with_state(state.clone())
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/gettime", get(system::get_time))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
