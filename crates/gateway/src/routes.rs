//! Passthrough route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET /health              - Health check
//! GET /api/search          - Product search (keyword, category_id, page, page_size)
//! GET /api/product/{id}    - Product detail
//! ```

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::error::Result;
use crate::marketplace::{SearchParams, SearchQuery, UpstreamResponse};
use crate::state::AppState;

/// Create the API routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/product/{id}", get(product))
}

/// Forward a product search.
///
/// # Errors
///
/// Returns `AppError::Marketplace` if the upstream call fails.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let params = SearchParams::from(query);
    let upstream = state.marketplace().search(&params).await?;
    Ok(relay(upstream))
}

/// Forward a product detail lookup.
///
/// # Errors
///
/// Returns `AppError::Marketplace` if the upstream call fails.
pub async fn product(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let upstream = state.marketplace().product(&id).await?;
    Ok(relay(upstream))
}

/// Answer with the upstream status and the body bytes untouched.
fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, [(CONTENT_TYPE, "application/json")], upstream.body).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Bytes, to_bytes};

    use super::*;

    #[tokio::test]
    async fn test_relay_keeps_upstream_status_and_bytes() {
        const RAW: &str = r#"{"zeta":1,"alpha":12345678901234567890123,"price":1.10}"#;
        let response = relay(UpstreamResponse {
            status: 404,
            body: Bytes::from_static(RAW.as_bytes()),
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, RAW.as_bytes());
    }
}
