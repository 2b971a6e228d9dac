//! "My Products" page: the seller's saved products.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use seller_pro_core::{ProductCategory, ProductId};

use super::layout::{PageLayout, format_price};
use crate::db::PortfolioRepository;
use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::{CatalogProduct, NewCatalogProduct, Page};
use crate::state::AppState;

/// Query parameters for the portfolio page.
#[derive(Debug, Default, Deserialize)]
pub struct PortfolioQuery {
    /// Product to manage.
    pub product: Option<ProductId>,
    /// Set after a product was added.
    #[serde(default)]
    pub added: bool,
    /// Set after a price was updated.
    #[serde(default)]
    pub updated: bool,
}

/// Price update form data.
#[derive(Debug, Deserialize)]
pub struct PriceForm {
    pub price: f64,
}

/// Saved product row.
#[derive(Debug, Clone)]
pub struct SavedProductRow {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub raw_price: String,
    pub rating: String,
    pub sales: String,
    pub category: String,
    pub selected: bool,
}

impl SavedProductRow {
    fn new(product: &CatalogProduct, selected: bool) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: format_price(product.price),
            raw_price: format!("{:.2}", product.price),
            rating: product
                .rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
            sales: product.sales.to_string(),
            category: product.category_label(),
            selected,
        }
    }
}

/// Portfolio template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate {
    pub layout: PageLayout,
    pub products: Vec<SavedProductRow>,
    pub managed: Option<SavedProductRow>,
    pub categories: Vec<&'static str>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Display the seller's saved products.
///
/// # Errors
///
/// Returns an error if the store or the session fails.
pub async fn show(
    State(state): State<AppState>,
    mut seller: RequireSeller,
    Query(query): Query<PortfolioQuery>,
) -> Result<PortfolioTemplate> {
    seller.dashboard.navigate(Page::Portfolio);
    seller.save().await?;

    let mut template = render(&state, &seller, query.product, None).await?;
    if let Some(managed) = &template.managed {
        if query.added {
            template.success = Some(format!("{} added to your portfolio!", managed.name));
        } else if query.updated {
            template.success = Some(format!("Price updated to {}", managed.price));
        }
    }
    Ok(template)
}

/// Add a product to the store and link it to the seller.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn add(
    State(state): State<AppState>,
    seller: RequireSeller,
    Form(form): Form<NewCatalogProduct>,
) -> Result<Response> {
    if let Err(message) = form.validate() {
        let template = render(&state, &seller, None, Some(message)).await?;
        return Ok((StatusCode::BAD_REQUEST, template).into_response());
    }

    let product = PortfolioRepository::new(state.pool())
        .add_product_for_user(&seller.seller.email, &form)
        .await?;

    Ok(Redirect::to(&format!("/portfolio?product={}&added=true", product.id)).into_response())
}

/// Change the price of a saved product.
///
/// # Errors
///
/// Returns `AppError::Database(RepositoryError::NotFound)` if the product is
/// not in this seller's portfolio.
pub async fn update_price(
    State(state): State<AppState>,
    seller: RequireSeller,
    Path(id): Path<ProductId>,
    Form(form): Form<PriceForm>,
) -> Result<Response> {
    if !form.price.is_finite() || form.price < 0.0 {
        let message = "Price must be zero or more".to_string();
        let template = render(&state, &seller, Some(id), Some(message)).await?;
        return Ok((StatusCode::BAD_REQUEST, template).into_response());
    }

    PortfolioRepository::new(state.pool())
        .update_price(&seller.seller.email, id, form.price)
        .await?;

    Ok(Redirect::to(&format!("/portfolio?product={id}&updated=true")).into_response())
}

async fn render(
    state: &AppState,
    seller: &RequireSeller,
    selected: Option<ProductId>,
    error: Option<String>,
) -> Result<PortfolioTemplate> {
    let saved = PortfolioRepository::new(state.pool())
        .get_user_products(&seller.seller.email)
        .await?;

    // Defaults to the first saved product, like the dashboard selector.
    let managed_id = selected
        .filter(|id| saved.iter().any(|p| p.id == *id))
        .or_else(|| saved.first().map(|p| p.id));

    let products: Vec<SavedProductRow> = saved
        .iter()
        .map(|p| SavedProductRow::new(p, Some(p.id) == managed_id))
        .collect();
    let managed = products.iter().find(|p| p.selected).cloned();

    Ok(PortfolioTemplate {
        layout: PageLayout::new(Page::Portfolio, &seller.seller, &state.config().marketplace_name),
        products,
        managed,
        categories: ProductCategory::ALL.iter().map(|c| c.label()).collect(),
        success: None,
        error,
    })
}

