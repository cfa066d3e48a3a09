use alloc::borrow::Cow;
use std::{io, path::PathBuf};

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::common::model::{ApiStatus, GenericError};

/// The log file could not be opened or written.
///
/// This is the only failure an ingestion call surfaces to its caller.
#[derive(Debug)]
pub enum StorageError {
    /// Opening (or creating) the log file or its parent directory failed
    Open { path: PathBuf, source: io::Error },

    /// The append did not complete
    Write { path: PathBuf, source: io::Error },
}

impl StorageError {
    /// Returns the HTTP status code for this error
    #[inline]
    pub fn status_code(&self) -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }

    /// Returns the error type identifier
    #[inline]
    pub fn error_type(&self) -> &'static str { "storage_failure" }

    #[inline]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// Converts to Generic error format
    #[inline]
    pub fn into_generic(self) -> GenericError {
        GenericError {
            status: ApiStatus::Error,
            code: Some(self.status_code()),
            error: Some(Cow::Borrowed(self.error_type())),
            message: Some(Cow::Owned(self.to_string())),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open log file '{}': {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to append to log file '{}': {source}", path.display())
            }
        }
    }
}

impl core::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

impl IntoResponse for StorageError {
    #[inline]
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_generic())).into_response()
    }
}
