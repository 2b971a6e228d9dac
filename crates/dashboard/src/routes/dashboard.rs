//! Product performance dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use seller_pro_core::{Product, ProductId};

use super::layout::{PageLayout, format_price};
use crate::error::{AppError, Result};
use crate::middleware::RequireSeller;
use crate::models::Page;
use crate::services::catalog::{TrendPoint, sales_trend};
use crate::services::forecast::{FORECAST_MONTHS, forecast_horizon, forecast_sales};
use crate::state::AppState;

/// Query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Product to select.
    pub product: Option<ProductId>,
    /// Show the price recommendation.
    #[serde(default)]
    pub recommend: bool,
    /// Show the sales trend and forecast.
    #[serde(default)]
    pub trend: bool,
    /// Forecast horizon in months.
    pub months: Option<u32>,
}

/// Product option in the selector.
#[derive(Debug, Clone)]
pub struct ProductOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// Forecast horizon option.
#[derive(Debug, Clone)]
pub struct MonthOption {
    pub value: u32,
    pub selected: bool,
}

/// Metrics for the selected product.
#[derive(Debug, Clone)]
pub struct ProductMetrics {
    pub price: String,
    pub rating: String,
    pub sales: String,
}

impl From<&Product> for ProductMetrics {
    fn from(product: &Product) -> Self {
        Self {
            price: format_price(product.price),
            rating: format!("{}/5", product.rating),
            sales: format!("{} units", product.sales),
        }
    }
}

/// Price recommendation view.
#[derive(Debug, Clone)]
pub struct RecommendationView {
    pub price: String,
    pub basis: String,
}

/// A labelled value in a chart table.
#[derive(Debug, Clone)]
pub struct ChartRow {
    pub label: String,
    pub value: String,
    /// Bar width in percent of the largest value.
    pub width: u32,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: PageLayout,
    pub products: Vec<ProductOption>,
    pub selected_id: i32,
    pub metrics: ProductMetrics,
    pub recommendation: Option<RecommendationView>,
    pub trend: Vec<ChartRow>,
    pub forecast: Vec<ChartRow>,
    pub show_trend: bool,
    pub month_options: Vec<MonthOption>,
}

/// Display the dashboard page.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
pub async fn show(
    State(state): State<AppState>,
    mut seller: RequireSeller,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate> {
    seller.dashboard.navigate(Page::Dashboard);
    if let Some(id) = query.product {
        seller.dashboard.select_product(id);
    }
    seller.save().await?;

    let dashboard = &seller.dashboard;
    let workspace = dashboard
        .workspace
        .as_ref()
        .ok_or_else(|| AppError::Internal("session workspace missing".to_string()))?;
    let product = dashboard
        .selected()
        .ok_or_else(|| AppError::NotFound("no products in session".to_string()))?;

    let recommendation = query.recommend.then(|| {
        let rec = workspace.advisor().recommend(product);
        RecommendationView {
            price: format_price(rec.price),
            basis: rec.basis.to_string(),
        }
    });

    let months = forecast_horizon(query.months);
    let (trend, forecast) = if query.trend {
        let points = sales_trend(&mut rand::rng());
        let history: Vec<u32> = points.iter().map(|p| p.sales).collect();
        let projected = forecast_sales(&history, months);
        (trend_rows(&points), forecast_rows(&projected))
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(DashboardTemplate {
        layout: PageLayout::new(Page::Dashboard, &seller.seller, &state.config().marketplace_name),
        products: workspace
            .products
            .iter()
            .map(|p| ProductOption {
                id: p.id.as_i32(),
                name: p.name.clone(),
                selected: p.id == product.id,
            })
            .collect(),
        selected_id: product.id.as_i32(),
        metrics: ProductMetrics::from(product),
        recommendation,
        trend,
        forecast,
        show_trend: query.trend,
        month_options: FORECAST_MONTHS
            .map(|value| MonthOption {
                value,
                selected: value == months,
            })
            .collect(),
    })
}

fn trend_rows(points: &[TrendPoint]) -> Vec<ChartRow> {
    let max = points.iter().map(|p| f64::from(p.sales)).fold(0.0, f64::max);
    points
        .iter()
        .map(|p| ChartRow {
            label: p.month.to_string(),
            value: p.sales.to_string(),
            width: bar_width(f64::from(p.sales), max),
        })
        .collect()
}

fn forecast_rows(values: &[f64]) -> Vec<ChartRow> {
    let max = values.iter().copied().fold(0.0, f64::max);
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| ChartRow {
            label: format!("Month {}", i + 1),
            value: format!("{value:.0}"),
            width: bar_width(value, max),
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_width(value: f64, max: f64) -> u32 {
    if max <= 0.0 {
        return 0;
    }
    (value / max * 100.0).round().clamp(0.0, 100.0) as u32
}
