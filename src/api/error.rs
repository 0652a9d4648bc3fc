//! API errors and their HTTP responses.
//!
//! Bodies mirror what dashboard clients already expect: a JSON
//! `{"error": ...}` object for validation and chart failures, plain text for
//! the history page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::prediction::InputError;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("history query failed: {0:#}")]
    HistoryUnavailable(anyhow::Error),

    #[error("latest query failed: {0:#}")]
    LatestUnavailable(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::HistoryUnavailable(_) | ApiError::LatestUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_error!("API error: {self}");
        } else {
            log_warn!("API error: {self}");
        }

        match self {
            ApiError::InvalidInput(err) => {
                let body = ErrorBody {
                    error: "Invalid or missing input",
                    field: Some(err.field()),
                    detail: Some(err.to_string()),
                };
                (status, Json(body)).into_response()
            }
            ApiError::MalformedBody(detail) => {
                let body = ErrorBody {
                    error: "Invalid or missing input",
                    field: None,
                    detail: Some(detail),
                };
                (status, Json(body)).into_response()
            }
            ApiError::HistoryUnavailable(_) => (status, "Error fetching history").into_response(),
            ApiError::LatestUnavailable(_) => {
                let body = ErrorBody {
                    error: "DB error",
                    field: None,
                    detail: None,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = ApiError::from(InputError::Missing("hr"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MalformedBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn query_failures_are_server_errors() {
        assert_eq!(
            ApiError::HistoryUnavailable(anyhow!("locked")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::LatestUnavailable(anyhow!("locked")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
