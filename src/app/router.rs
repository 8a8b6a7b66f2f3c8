use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{delete, get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app, app::errors::DefaultApiError, files, AppState};

/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let body_limit: usize = state
        .upload_policy
        .max_upload_size
        .saturating_add(MULTIPART_OVERHEAD)
        .try_into()
        .unwrap_or(usize::MAX);
    let rate_limit = state.envy.rate_limit_per_second();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET, Method::DELETE]);

    Router::new()
        .route("/", get(app::controller::get_root))
        // files
        .route("/files", get(files::controller::get_files))
        .route(
            "/files",
            post(files::controller::post_files).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/files", delete(files::controller::delete_file))
        // layers
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!(%err);
                    DefaultApiError::ServiceUnavailable.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(1))),
        )
        .with_state(state)
}
