//! Competitor monitor page.
//!
//! Every visit with a product id records one more simulated observation.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::layout::{PageLayout, format_price};
use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::Page;
use crate::services::CompetitorSeries;
use crate::state::AppState;

/// Query parameters for the competitor page.
#[derive(Debug, Default, Deserialize)]
pub struct CompetitorQuery {
    pub product_id: Option<String>,
}

/// One observation row.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub observed_at: String,
    pub price: String,
    pub rating: String,
}

/// Competitor template.
#[derive(Template, WebTemplate)]
#[template(path = "competitors.html")]
pub struct CompetitorsTemplate {
    pub layout: PageLayout,
    pub product_id: String,
    pub samples: Vec<SampleRow>,
    pub latest_price: Option<String>,
    pub latest_rating: Option<String>,
    pub warning: Option<String>,
}

/// Newest observations first.
fn sample_rows(series: &CompetitorSeries) -> Vec<SampleRow> {
    series
        .samples
        .iter()
        .rev()
        .map(|s| SampleRow {
            observed_at: s.observed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            price: format_price(s.price),
            rating: format!("{:.2}", s.rating),
        })
        .collect()
}

/// Display the competitor monitor.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
pub async fn show(
    State(state): State<AppState>,
    mut seller: RequireSeller,
    Query(query): Query<CompetitorQuery>,
) -> Result<CompetitorsTemplate> {
    seller.dashboard.navigate(Page::Competitors);
    seller.save().await?;

    let product_id = query.product_id.unwrap_or_default();
    let mut template = CompetitorsTemplate {
        layout: PageLayout::new(
            Page::Competitors,
            &seller.seller,
            &state.config().marketplace_name,
        ),
        product_id: product_id.trim().to_string(),
        samples: Vec::new(),
        latest_price: None,
        latest_rating: None,
        warning: None,
    };

    // An empty field on first load is not a submission
    if !product_id.is_empty() {
        match state.competitors().track(&product_id) {
            Ok(series) => {
                if let Some(latest) = series.latest() {
                    template.latest_price = Some(format_price(latest.price));
                    template.latest_rating = Some(format!("{:.2}", latest.rating));
                }
                template.samples = sample_rows(&series);
            }
            Err(e) => template.warning = Some(e.to_string()),
        }
    }

    Ok(template)
}

