//! JSON API handlers.
//!
//! Same session and services as the HTML pages; a missing login yields
//! `401` instead of a redirect.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use seller_pro_core::{LinkId, Product, ProductId};

use crate::db::PortfolioRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireSeller;
use crate::models::CatalogProduct;
use crate::services::CompetitorSeries;
use crate::services::catalog::{TrendPoint, sales_trend};
use crate::services::forecast::{forecast_horizon, forecast_sales};
use crate::services::pricing::PricingBasis;
use crate::state::AppState;

// =============================================================================
// Price Recommendation
// =============================================================================

/// Request for a price recommendation.
///
/// Either names a product from the session dataset or supplies a full
/// record to price against it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceRequest {
    Product { product: Product },
    ById { product_id: ProductId },
}

/// Price recommendation response.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub product_id: ProductId,
    pub price: f64,
    pub basis: PricingBasis,
}

/// Recommend a price using the session's model and dataset.
///
/// # Errors
///
/// Returns `AppError::NotFound` if `product_id` is not in the session dataset.
pub async fn price_recommendation(
    seller: RequireSeller,
    Json(body): Json<PriceRequest>,
) -> Result<Json<PriceResponse>> {
    let workspace = seller
        .dashboard
        .workspace
        .as_ref()
        .ok_or_else(|| AppError::Internal("session workspace missing".to_string()))?;

    let product = match body {
        PriceRequest::Product { product } => product,
        PriceRequest::ById { product_id } => workspace
            .product(product_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?,
    };

    let rec = workspace.advisor().recommend(&product);
    Ok(Json(PriceResponse {
        product_id: product.id,
        price: rec.price,
        basis: rec.basis,
    }))
}

// =============================================================================
// Ad Copy
// =============================================================================

/// Request for ad copy.
#[derive(Debug, Deserialize)]
pub struct AdCopyRequest {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub keywords: String,
}

/// Ad copy response.
#[derive(Debug, Serialize)]
pub struct AdCopyResponse {
    pub ad_copy: String,
}

/// Generate (or recall) ad copy.
///
/// # Errors
///
/// Returns `AppError::AdCopy` if either field is blank.
pub async fn ad_copy(
    State(state): State<AppState>,
    _seller: RequireSeller,
    Json(body): Json<AdCopyRequest>,
) -> Result<Json<AdCopyResponse>> {
    let ad_copy = state
        .ad_copy()
        .generate(&body.product_name, &body.keywords)
        .await?;
    Ok(Json(AdCopyResponse { ad_copy }))
}

// =============================================================================
// Competitors
// =============================================================================

/// Record one observation and return the product's history.
///
/// # Errors
///
/// Returns `AppError::Track` for a blank product id.
pub async fn competitors(
    State(state): State<AppState>,
    _seller: RequireSeller,
    Path(product_id): Path<String>,
) -> Result<Json<CompetitorSeries>> {
    Ok(Json(state.competitors().track(&product_id)?))
}

// =============================================================================
// Forecast
// =============================================================================

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub months: Option<u32>,
}

/// Sales trend plus projection.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub history: Vec<TrendPoint>,
    pub months: u32,
    pub forecast: Vec<f64>,
}

/// Sample a sales trend and project it forward.
pub async fn forecast(
    _seller: RequireSeller,
    Query(query): Query<ForecastQuery>,
) -> Json<ForecastResponse> {
    let months = forecast_horizon(query.months);
    let history = sales_trend(&mut rand::rng());
    let sales: Vec<u32> = history.iter().map(|p| p.sales).collect();
    Json(ForecastResponse {
        forecast: forecast_sales(&sales, months),
        history,
        months,
    })
}

// =============================================================================
// Portfolio
// =============================================================================

/// Request to link a product to the seller.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub product_id: ProductId,
}

/// Created link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub link_id: LinkId,
    pub product: Option<CatalogProduct>,
}

/// List the seller's saved products.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn portfolio(
    State(state): State<AppState>,
    seller: RequireSeller,
) -> Result<Json<Vec<CatalogProduct>>> {
    let products = PortfolioRepository::new(state.pool())
        .get_user_products(&seller.seller.email)
        .await?;
    Ok(Json(products))
}

/// Link a product to the seller.
///
/// Products the store has never seen are fetched from the marketplace
/// first, so the link shows up in the portfolio.
///
/// # Errors
///
/// Returns `AppError::Database` if a statement fails.
pub async fn link_product(
    State(state): State<AppState>,
    seller: RequireSeller,
    Json(body): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    let repo = PortfolioRepository::new(state.pool());

    let mut product = repo.get_product(body.product_id).await?;
    if product.is_none() {
        let fetched = state.marketplace().product(body.product_id).await;
        repo.upsert_catalog_product(&fetched).await?;
        product = repo.get_product(body.product_id).await?;
    }

    let link_id = repo
        .save_user_product(&seller.seller.email, body.product_id)
        .await?;

    Ok((StatusCode::CREATED, Json(LinkResponse { link_id, product })))
}
