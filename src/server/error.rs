//! HTTP error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::scan::{Channel, ScanError};

/// JSON body of every non-success response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to determine the latest {channel} version")]
    Scan {
        channel: Channel,
        #[source]
        source: ScanError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Scan { channel, source } => {
                error!(%channel, error = %source, "scan failed");
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
            retry_after: None,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
