//! Gateway passthrough tests against a fake marketplace.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use seller_pro_gateway::state::AppState;
use seller_pro_integration_tests::{gateway_config, spawn};

/// What the fake marketplace saw on its last request.
#[derive(Debug, Clone, Default)]
struct Seen {
    path: String,
    query: HashMap<String, String>,
    authorization: Option<String>,
}

type Recorder = Arc<Mutex<Option<Seen>>>;

fn record(recorder: &Recorder, path: &str, query: HashMap<String, String>, headers: &HeaderMap) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *recorder.lock().unwrap() = Some(Seen {
        path: path.to_string(),
        query,
        authorization,
    });
}

/// Body returned for product id `raw`, with formatting a JSON re-encode
/// would change.
const RAW_PRODUCT: &str = r#"{"zeta":1,"alpha":12345678901234567890123,"price":1.10}"#;

/// Marketplace stand-in: search echoes a page of results, product lookups
/// answer 404 for id `missing`, plain text for id `broken` and
/// [`RAW_PRODUCT`] for id `raw`.
fn fake_marketplace(recorder: Recorder) -> Router {
    Router::new()
        .route(
            "/v1/product/search",
            get(
                |State(recorder): State<Recorder>,
                 Query(query): Query<HashMap<String, String>>,
                 headers: HeaderMap| async move {
                    record(&recorder, "/v1/product/search", query.clone(), &headers);
                    Json(json!({ "products": [{ "name": "Echo" }], "query": query }))
                },
            ),
        )
        .route(
            "/v1/product/get",
            get(
                |State(recorder): State<Recorder>,
                 Query(query): Query<HashMap<String, String>>,
                 headers: HeaderMap| async move {
                    let id = query.get("product_id").cloned().unwrap_or_default();
                    record(&recorder, "/v1/product/get", query, &headers);
                    match id.as_str() {
                        "missing" => {
                            (StatusCode::NOT_FOUND, Json(json!({ "error": "no such product" })))
                                .into_response()
                        }
                        "broken" => (StatusCode::OK, "<html>oops</html>").into_response(),
                        "raw" => RAW_PRODUCT.into_response(),
                        _ => Json(json!({ "product_id": id, "name": "Yoga Mat" })).into_response(),
                    }
                },
            ),
        )
        .with_state(recorder)
}

async fn start_gateway() -> (String, Recorder) {
    let recorder: Recorder = Arc::default();
    let upstream = spawn(fake_marketplace(Arc::clone(&recorder))).await;
    let config = gateway_config(&format!("{upstream}/v1/"));
    let gateway = spawn(seller_pro_gateway::app(AppState::new(config))).await;
    (gateway, recorder)
}

fn last_seen(recorder: &Recorder) -> Seen {
    recorder.lock().unwrap().clone().unwrap()
}

#[tokio::test]
async fn test_search_forwards_params_and_credentials() {
    let (gateway, recorder) = start_gateway().await;

    let resp = reqwest::get(format!(
        "{gateway}/api/search?keyword=yoga%20mat&category_id=304&page=2&page_size=20"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["products"][0]["name"], "Echo");

    let seen = last_seen(&recorder);
    assert_eq!(seen.path, "/v1/product/search");
    assert_eq!(seen.query["keyword"], "yoga mat");
    assert_eq!(seen.query["category_id"], "304");
    assert_eq!(seen.query["page"], "2");
    assert_eq!(seen.query["page_size"], "20");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer test-api-key"));
}

#[tokio::test]
async fn test_search_defaults_and_omits_missing_keyword() {
    let (gateway, recorder) = start_gateway().await;

    let resp = reqwest::get(format!("{gateway}/api/search")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let seen = last_seen(&recorder);
    assert!(!seen.query.contains_key("keyword"));
    assert!(!seen.query.contains_key("category_id"));
    assert_eq!(seen.query["page"], "1");
    assert_eq!(seen.query["page_size"], "10");
}

#[tokio::test]
async fn test_invalid_paging_falls_back_to_defaults() {
    let (gateway, recorder) = start_gateway().await;

    let resp = reqwest::get(format!(
        "{gateway}/api/search?keyword=x&page=first&page_size=many"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let seen = last_seen(&recorder);
    assert_eq!(seen.query["keyword"], "x");
    assert_eq!(seen.query["page"], "1");
    assert_eq!(seen.query["page_size"], "10");
}

#[tokio::test]
async fn test_empty_category_is_not_forwarded() {
    let (gateway, recorder) = start_gateway().await;

    let resp = reqwest::get(format!("{gateway}/api/search?keyword=mat&category_id="))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!last_seen(&recorder).query.contains_key("category_id"));
}

#[tokio::test]
async fn test_upstream_body_is_relayed_byte_for_byte() {
    let (gateway, _) = start_gateway().await;

    let resp = reqwest::get(format!("{gateway}/api/product/raw")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert_eq!(resp.text().await.unwrap(), RAW_PRODUCT);
}

#[tokio::test]
async fn test_product_lookup_sends_user_id() {
    let (gateway, recorder) = start_gateway().await;

    let body: Value = reqwest::get(format!("{gateway}/api/product/1004"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["product_id"], "1004");

    let seen = last_seen(&recorder);
    assert_eq!(seen.path, "/v1/product/get");
    assert_eq!(seen.query["product_id"], "1004");
    assert_eq!(seen.query["user_id"], "seller-77");
}

#[tokio::test]
async fn test_upstream_status_is_preserved() {
    let (gateway, _) = start_gateway().await;

    let resp = reqwest::get(format!("{gateway}/api/product/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "no such product");
}

#[tokio::test]
async fn test_non_json_upstream_is_bad_gateway() {
    let (gateway, _) = start_gateway().await;

    let resp = reqwest::get(format!("{gateway}/api/product/broken")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let gateway = spawn(seller_pro_gateway::app(AppState::new(gateway_config(&closed)))).await;
    let resp = reqwest::get(format!("{gateway}/api/product/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let (gateway, _) = start_gateway().await;

    let resp = reqwest::Client::new()
        .get(format!("{gateway}/health"))
        .header("Origin", "http://localhost:8501")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}
