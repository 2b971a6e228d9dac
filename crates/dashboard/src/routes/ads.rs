//! Advertising tools page: ad copy and budget split.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::layout::{PageLayout, format_price};
use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::Page;
use crate::services::campaign::{BUDGET_RANGE, DEFAULT_BUDGET, allocate_budget};
use crate::state::AppState;

/// Query parameters for the advertising page.
///
/// Ad copy is only generated once the form has been submitted, i.e. when
/// either text field is present.
#[derive(Debug, Default, Deserialize)]
pub struct AdsQuery {
    pub product_name: Option<String>,
    pub keywords: Option<String>,
    pub budget: Option<u32>,
}

/// One platform in the budget split.
#[derive(Debug, Clone)]
pub struct AllocationRow {
    pub platform: String,
    pub percent: u32,
    pub amount: String,
}

/// Advertising template.
#[derive(Template, WebTemplate)]
#[template(path = "ads.html")]
pub struct AdsTemplate {
    pub layout: PageLayout,
    pub product_name: String,
    pub keywords: String,
    pub ad_copy: Option<String>,
    pub warning: Option<String>,
    pub budget: u32,
    pub budget_min: u32,
    pub budget_max: u32,
    pub allocations: Vec<AllocationRow>,
}

/// Display the advertising page.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
pub async fn show(
    State(state): State<AppState>,
    mut seller: RequireSeller,
    Query(query): Query<AdsQuery>,
) -> Result<AdsTemplate> {
    seller.dashboard.navigate(Page::Advertising);
    seller.save().await?;

    let submitted = query.product_name.is_some() || query.keywords.is_some();
    let product_name = query.product_name.unwrap_or_default();
    let keywords = query.keywords.unwrap_or_default();

    let (ad_copy, warning) = if submitted {
        match state.ad_copy().generate(&product_name, &keywords).await {
            Ok(copy) => (Some(copy), None),
            Err(e) => (None, Some(e.to_string())),
        }
    } else {
        (None, None)
    };

    let marketplace = &state.config().marketplace_name;
    let budget = query
        .budget
        .unwrap_or(DEFAULT_BUDGET)
        .clamp(*BUDGET_RANGE.start(), *BUDGET_RANGE.end());
    let allocations = allocate_budget(Some(budget), marketplace)
        .into_iter()
        .map(|a| AllocationRow {
            platform: a.platform,
            percent: percent(a.share),
            amount: format_price(a.amount),
        })
        .collect();

    Ok(AdsTemplate {
        layout: PageLayout::new(Page::Advertising, &seller.seller, marketplace),
        product_name,
        keywords,
        ad_copy,
        warning,
        budget,
        budget_min: *BUDGET_RANGE.start(),
        budget_max: *BUDGET_RANGE.end(),
        allocations,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(share: f64) -> u32 {
    (share * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_shares() {
        assert_eq!(percent(0.4), 40);
        assert_eq!(percent(0.1), 10);
    }
}
