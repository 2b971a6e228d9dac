//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Pages (require login)
//! GET  /                       - Current page of the session
//! POST /navigate               - Switch current page
//! GET  /dashboard              - Product metrics, price recommendation, trend
//! GET  /research               - Product search and market gaps
//! GET  /ads                    - Ad copy and budget optimizer
//! GET  /competitors            - Competitor monitor
//! GET  /portfolio              - Saved products
//! POST /portfolio              - Add a product
//! POST /portfolio/{id}/price   - Update a saved product's price
//!
//! # JSON API (require login, 401 otherwise)
//! POST /api/price-recommendation
//! POST /api/ad-copy
//! GET  /api/competitors/{product_id}
//! GET  /api/forecast
//! GET  /api/portfolio
//! POST /api/portfolio/links
//! ```

pub mod ads;
pub mod api;
pub mod auth;
pub mod competitors;
pub mod dashboard;
pub mod home;
pub mod layout;
pub mod portfolio;
pub mod research;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/navigate", post(home::navigate))
        .route("/dashboard", get(dashboard::show))
        .route("/research", get(research::show))
        .route("/ads", get(ads::show))
        .route("/competitors", get(competitors::show))
        .route("/portfolio", get(portfolio::show).post(portfolio::add))
        .route("/portfolio/{id}/price", post(portfolio::update_price))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/price-recommendation", post(api::price_recommendation))
        .route("/ad-copy", post(api::ad_copy))
        .route("/competitors/{product_id}", get(api::competitors))
        .route("/forecast", get(api::forecast))
        .route("/portfolio", get(api::portfolio))
        .route("/portfolio/links", post(api::link_product))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(page_routes())
        .nest("/api", api_routes())
}
