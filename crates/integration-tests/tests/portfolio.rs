//! Saved-product tests through the HTML forms and the JSON API.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use serde_json::{Value, json};

use seller_pro_core::{Email, ProductId};
use seller_pro_dashboard::db::PortfolioRepository;
use seller_pro_integration_tests::DashboardContext;

#[tokio::test]
async fn test_empty_portfolio_message() {
    let ctx = DashboardContext::start().await;
    let client = ctx.login("empty@example.com").await;

    let body = client.get(ctx.url("/portfolio")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("You haven't added any products yet"));

    let products: Vec<Value> = client
        .get(ctx.url("/api/portfolio"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_add_product_then_update_price() {
    let ctx = DashboardContext::start().await;
    let client = ctx.login("grower@example.com").await;

    let resp = client
        .post(ctx.url("/portfolio"))
        .form(&[("name", "Garden Hose"), ("price", "14.5"), ("category", "Home & Garden")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    let target = resp.headers()[LOCATION].to_str().unwrap().to_string();
    assert!(target.ends_with("&added=true"), "{target}");

    let body = client.get(ctx.url(&target)).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("Garden Hose added to your portfolio!"));

    let products: Vec<Value> = client
        .get(ctx.url("/api/portfolio"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Garden Hose");
    let id = products[0]["id"].as_i64().unwrap();

    let resp = client
        .post(ctx.url(&format!("/portfolio/{id}/price")))
        .form(&[("price", "19.5")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()[LOCATION],
        format!("/portfolio?product={id}&updated=true").as_str()
    );

    let stored = PortfolioRepository::new(&ctx.pool)
        .get_product(ProductId::new(i32::try_from(id).unwrap()))
        .await
        .unwrap()
        .unwrap();
    assert!((stored.price - 19.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_add_product_validation() {
    let ctx = DashboardContext::start().await;
    let client = ctx.login("strict@example.com").await;

    let resp = client
        .post(ctx.url("/portfolio"))
        .form(&[("name", "   "), ("price", "3"), ("category", "Fashion")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("Product name is required"));

    let resp = client
        .post(ctx.url("/portfolio"))
        .form(&[("name", "Socks"), ("price", "0.01"), ("category", "Fashion")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let saved = PortfolioRepository::new(&ctx.pool)
        .get_user_products(&Email::parse("strict@example.com").unwrap())
        .await
        .unwrap();
    assert!(saved.is_empty());
}

#[tokio::test]
async fn test_price_update_requires_ownership() {
    let ctx = DashboardContext::start().await;
    let owner = ctx.login("owner@example.com").await;
    let other = ctx.login("other@example.com").await;

    let resp = owner
        .post(ctx.url("/api/portfolio/links"))
        .json(&json!({ "product_id": 1003 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = other
        .post(ctx.url("/portfolio/1003/price"))
        .form(&[("price", "1.0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = owner
        .post(ctx.url("/portfolio/1003/price"))
        .form(&[("price", "-2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_link_known_and_unknown_products() {
    let ctx = DashboardContext::start().await;
    let client = ctx.login("linker@example.com").await;

    let body: Value = client
        .post(ctx.url("/api/portfolio/links"))
        .json(&json!({ "product_id": 1002 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["product"]["name"], "Bluetooth Speaker");

    let body: Value = client
        .post(ctx.url("/api/portfolio/links"))
        .json(&json!({ "product_id": 7777 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["product"]["id"], 7777);

    let ids: Vec<i64> = client
        .get(ctx.url("/api/portfolio"))
        .send()
        .await
        .unwrap()
        .json::<Vec<Value>>()
        .await
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1002, 7777]);
}

#[tokio::test]
async fn test_portfolios_are_per_seller() {
    let ctx = DashboardContext::start().await;
    let repo = PortfolioRepository::new(&ctx.pool);
    repo.save_user_product(&Email::parse("a@example.com").unwrap(), ProductId::new(1001))
        .await
        .unwrap();

    let other = ctx.login("b@example.com").await;
    let products: Vec<Value> = other
        .get(ctx.url("/api/portfolio"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(products.is_empty());

    let owner = ctx.login("a@example.com").await;
    let products: Vec<Value> = owner
        .get(ctx.url("/api/portfolio"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Wireless Headphones");
}
