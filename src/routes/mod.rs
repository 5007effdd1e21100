use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, Method, StatusCode},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::posts::{posts_handler, posts_root},
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let prefix = app_state.config.route_prefix.clone();
    let request_timeout = app_state.config.request_timeout;

    Router::new()
        .nest(&prefix, posts_handler())
        .route(&format!("{prefix}/"), posts_root())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(Extension(app_state))
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
