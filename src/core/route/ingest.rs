use alloc::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use serde::Serialize;

use crate::{
    app::model::AppState,
    common::model::ApiStatus,
    core::{error::StorageError, ingest::IngestReport},
};

#[derive(Serialize)]
pub struct IngestResponse {
    pub status: ApiStatus,
    #[serde(flatten)]
    pub report: IngestReport,
}

pub async fn handle_ingest(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<IngestResponse>, StorageError> {
    let active = state.enter();
    let result = state.ingestor.ingest_blocking(body).await;
    drop(active);

    match result {
        Ok(report) => {
            tracing::debug!(bytes = report.bytes, frames = report.frames, "ingested");
            Ok(Json(IngestResponse { status: ApiStatus::Success, report }))
        }
        Err(e) => {
            state.increment_error();
            tracing::error!("{e}");
            Err(e)
        }
    }
}
