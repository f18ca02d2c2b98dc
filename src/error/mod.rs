//! Error types and HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::client::ApiError;

/// Application error type
#[derive(Debug, Error)]
pub enum ShopfrontError {
    /// Bad request (malformed multipart, missing fields)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream API failure
    #[error("Upstream error: {0}")]
    Api(#[from] ApiError),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ShopfrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Api(ApiError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Api(_) | Self::ServerError(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::error!(error = %self, status = %status, "request failed");
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ShopfrontError::BadRequest("no image".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ShopfrontError::Api(ApiError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ShopfrontError::NotFound("batch".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
