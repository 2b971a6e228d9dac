//! Seller Pro marketplace gateway.
//!
//! A stateless passthrough in front of the marketplace product API. It holds
//! the API credentials so browsers never see them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod marketplace;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the gateway router with permissive CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri().path(),
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::GatewayConfig;

    fn test_app() -> Router {
        app(AppState::new(GatewayConfig {
            api_base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            api_key: SecretString::from("key"),
            user_id: "seller".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 5001,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }))
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_page_reaches_upstream() {
        // Nothing listens on the upstream port, so a forwarded search is a 502.
        let response = test_app()
            .oneshot(Request::get("/api/search?page_size=lots").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
