use super::{
    config::IngestConfig,
    constant::{CORS_ALLOW_HEADERS, CORS_MAX_AGE_SECS, ROUTE_HEALTH_PATH},
    model::AppState,
};
use crate::core::route::{handle_health, handle_ingest};
use alloc::sync::Arc;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use core::time::Duration;
use http::{HeaderName, HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

pub fn create_router(state: Arc<AppState>, config: &IngestConfig) -> Router {
    // CORS 与请求体上限只作用于接收端点，其他路径（含 OPTIONS）一律 404
    let ingest = Router::new()
        .route(&config.ingest_path(), post(handle_ingest))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.request_body_limit))
        .layer(cors_layer(&config.allow_origin));

    Router::new().route(ROUTE_HEALTH_PATH, get(handle_health)).merge(ingest).with_state(state)
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static(CORS_ALLOW_HEADERS)])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    if allow_origin.is_empty() || allow_origin == "*" {
        return cors.allow_origin(Any);
    }

    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            // 不放行任何跨域来源
            tracing::warn!("无效的 ALLOW_ORIGIN '{allow_origin}': {e}");
            cors
        }
    }
}
