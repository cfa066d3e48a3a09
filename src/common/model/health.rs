use chrono::{DateTime, Local};
use serde::Serialize;

use super::ApiStatus;

#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: ApiStatus,
    pub service: ServiceInfo,
    pub runtime: RuntimeStats,
    pub storage: StorageInfo,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct RuntimeStats {
    pub started_at: DateTime<Local>,
    pub uptime_seconds: i64,
    pub requests: RequestStats,
}

#[derive(Serialize)]
pub struct RequestStats {
    pub total: u64,
    pub active: u64,
    pub errors: u64,
}

#[derive(Serialize)]
pub struct StorageInfo {
    pub log_path: String,
    pub bytes_appended: u64,
    pub frames_previewed: u64,
}
