//! Product research page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use seller_pro_core::Product;

use super::layout::{PageLayout, format_price};
use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::Page;
use crate::services::SearchQuery;
use crate::services::campaign::market_gaps;
use crate::services::catalog::top_sellers;
use crate::state::AppState;

/// Rows shown in the results table.
const RESULT_ROWS: usize = 10;

/// Best sellers highlighted under the results.
const TOP_PRODUCTS: usize = 2;

/// Query parameters for the research page.
#[derive(Debug, Default, Deserialize)]
pub struct ResearchQuery {
    pub keyword: Option<String>,
    /// Run the market gap analysis.
    #[serde(default)]
    pub gap: bool,
}

/// Search result row.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub rating: String,
    pub sales: String,
    pub category_id: String,
}

impl From<&Product> for ResultRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_price(product.price),
            rating: format!("{:.1}", product.rating),
            sales: product.sales.to_string(),
            category_id: product.category_id.to_string(),
        }
    }
}

/// Market opportunity row.
#[derive(Debug, Clone)]
pub struct GapRow {
    pub category: String,
    pub demand: String,
    pub competition: String,
}

/// Research template.
#[derive(Template, WebTemplate)]
#[template(path = "research.html")]
pub struct ResearchTemplate {
    pub layout: PageLayout,
    pub keyword: String,
    pub results: Vec<ResultRow>,
    pub top_products: Vec<ResultRow>,
    pub gaps: Vec<GapRow>,
}

/// Display the research page.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
pub async fn show(
    State(state): State<AppState>,
    mut seller: RequireSeller,
    Query(query): Query<ResearchQuery>,
) -> Result<ResearchTemplate> {
    seller.dashboard.navigate(Page::Research);
    seller.save().await?;

    let keyword = query.keyword.unwrap_or_default().trim().to_string();
    let (results, top_products) = if keyword.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let found = state.marketplace().search(&SearchQuery::new(keyword.clone()));
        tracing::debug!(keyword = %keyword, results = found.len(), "Product search");
        (
            found.iter().take(RESULT_ROWS).map(ResultRow::from).collect(),
            top_sellers(&found, TOP_PRODUCTS)
                .iter()
                .map(ResultRow::from)
                .collect(),
        )
    };

    let gaps = if query.gap {
        market_gaps()
            .into_iter()
            .map(|o| GapRow {
                category: o.category.to_string(),
                demand: o.demand.to_string(),
                competition: o.competition.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(ResearchTemplate {
        layout: PageLayout::new(Page::Research, &seller.seller, &state.config().marketplace_name),
        keyword,
        results,
        top_products,
        gaps,
    })
}
