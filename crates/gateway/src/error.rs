//! Error responses for the gateway.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::marketplace::MarketplaceError;

/// Application-level error type for the gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// Marketplace could not be reached or answered garbage.
    #[error("Marketplace error: {0}")]
    Marketplace(#[from] MarketplaceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose upstream details to clients
        let (status, message) = match &self {
            Self::Marketplace(MarketplaceError::InvalidBaseUrl(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::Marketplace(_) => (StatusCode::BAD_GATEWAY, "Marketplace unavailable"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_bad_gateway() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = AppError::Marketplace(MarketplaceError::InvalidJson { status: 200, source });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_base_url_is_internal() {
        let err = AppError::Marketplace(MarketplaceError::InvalidBaseUrl("mailto:x".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
