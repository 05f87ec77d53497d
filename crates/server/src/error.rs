use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dashboard_core::errors::CoreError;
use serde_json::json;
use thiserror::Error;

/// Unified error type for API responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("dashboard worker unavailable")]
    WorkerUnavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::UnknownSeries(_)) => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::WorkerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_series_is_bad_request() {
        let err = ApiError::from(CoreError::UnknownSeries("Z.csv".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Unknown series: Z.csv");
    }

    #[test]
    fn other_core_errors_are_internal() {
        let err = ApiError::from(CoreError::Serialization("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn worker_gone_is_unavailable() {
        let response = ApiError::WorkerUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
