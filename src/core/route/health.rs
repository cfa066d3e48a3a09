use alloc::sync::Arc;

use axum::{Json, extract::State};
use chrono::Local;
use core::sync::atomic::Ordering::Relaxed;

use crate::{
    app::{
        constant::{PKG_NAME, PKG_VERSION},
        model::AppState,
    },
    common::model::{
        ApiStatus,
        health::{HealthCheckResponse, RequestStats, RuntimeStats, ServiceInfo, StorageInfo},
    },
};

pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    let ingestor = &state.ingestor;

    Json(HealthCheckResponse {
        status: ApiStatus::Success,
        service: ServiceInfo { name: PKG_NAME, version: PKG_VERSION },
        runtime: RuntimeStats {
            started_at: state.started_at,
            uptime_seconds: (Local::now() - state.started_at).num_seconds(),
            requests: RequestStats {
                total: state.total_requests.load(Relaxed),
                active: state.active_requests.load(Relaxed),
                errors: state.error_requests.load(Relaxed),
            },
        },
        storage: StorageInfo {
            log_path: ingestor.log_path().display().to_string(),
            bytes_appended: ingestor.bytes_appended(),
            frames_previewed: ingestor.frames_previewed(),
        },
    })
}
