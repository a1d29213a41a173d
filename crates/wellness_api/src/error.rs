//! Custom error types for the HTTP layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// API errors. Only boundary failures live here: the scoring engine is total
/// over its input domain and never produces one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("completion error: {0}")]
    Completion(#[from] crate::llm::LlmError),

    #[error("wearable data error: {0}")]
    Terra(#[from] terra_client::TerraError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} integration is not configured")]
    NotConfigured(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Terra(terra_client::TerraError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Terra(_) | Self::Completion(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Result type alias for handler code.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("sig".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotConfigured("terra").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Terra(terra_client::TerraError::NotFound("u".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Terra(terra_client::TerraError::Auth("k".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
