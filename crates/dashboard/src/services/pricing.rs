//! Price recommendations.
//!
//! A recommendation comes from the first source that applies:
//!
//! 1. a [`LinearPriceModel`] fitted on the session's products,
//! 2. the average price of same-category peers, discounted by 5%,
//! 3. the product's own price marked up by 10%.
//!
//! There is no error path. Whatever the inputs, a number comes out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seller_pro_core::Product;

/// Discount applied to the same-category average.
pub const CATEGORY_DISCOUNT: f64 = 0.95;

/// Markup applied when neither a model nor peers are available.
pub const FALLBACK_MARKUP: f64 = 1.1;

/// Pivots smaller than this make the normal equations singular.
const SINGULAR_EPSILON: f64 = 1e-10;

/// Number of regression features (rating, sales, category id).
const FEATURES: usize = 3;

/// How the dashboard produces price recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingStrategy {
    /// Fit a regression over the session dataset, falling back to peers.
    #[default]
    Regression,
    /// Skip the model and use same-category averages only.
    CategoryAverage,
}

impl PricingStrategy {
    /// Train whatever model this strategy calls for.
    ///
    /// A failed fit is logged and treated as "no model".
    #[must_use]
    pub fn train(self, rows: &[Product]) -> Option<LinearPriceModel> {
        match self {
            Self::CategoryAverage => None,
            Self::Regression => match LinearPriceModel::fit(rows) {
                Ok(model) => Some(model),
                Err(e) => {
                    tracing::warn!(error = %e, rows = rows.len(), "Price model not trained");
                    None
                }
            },
        }
    }
}

impl FromStr for PricingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "regression" | "model" => Ok(Self::Regression),
            "category-average" | "average" => Ok(Self::CategoryAverage),
            other => Err(format!(
                "unknown pricing strategy '{other}' (expected regression or category-average)"
            )),
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regression => f.write_str("regression"),
            Self::CategoryAverage => f.write_str("category-average"),
        }
    }
}

/// Why a model could not be fitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("need at least {required} rows to fit, got {rows}")]
    NotEnoughRows { rows: usize, required: usize },
    #[error("features are collinear or constant")]
    Singular,
}

/// Ordinary least squares of price on rating, sales and category id.
///
/// Features are standardized before solving the normal equations, so the
/// intercept is the mean training price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    intercept: f64,
    coefficients: [f64; FEATURES],
    means: [f64; FEATURES],
    scales: [f64; FEATURES],
}

impl LinearPriceModel {
    /// Fit the model on a set of products.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::NotEnoughRows`] when there are fewer rows than
    /// parameters and [`FitError::Singular`] when a feature is constant or the
    /// features are linearly dependent.
    pub fn fit(rows: &[Product]) -> Result<Self, FitError> {
        let required = FEATURES + 1;
        if rows.len() < required {
            return Err(FitError::NotEnoughRows {
                rows: rows.len(),
                required,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        let samples: Vec<[f64; FEATURES]> = rows.iter().map(features).collect();
        let mean_price = rows.iter().map(|p| p.price).sum::<f64>() / n;

        let mut means = [0.0; FEATURES];
        let mut scales = [0.0; FEATURES];
        for j in 0..FEATURES {
            let column = || samples.iter().map(move |x| x.get(j).copied().unwrap_or(0.0));
            let mean = column().sum::<f64>() / n;
            let variance = column().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            if variance.sqrt() < SINGULAR_EPSILON {
                return Err(FitError::Singular);
            }
            if let (Some(m), Some(s)) = (means.get_mut(j), scales.get_mut(j)) {
                *m = mean;
                *s = variance.sqrt();
            }
        }

        let standardized: Vec<[f64; FEATURES]> = samples
            .iter()
            .map(|x| standardize(x, &means, &scales))
            .collect();

        // Augmented normal equations: [Z'Z | Z'(y - mean)]
        let mut system = [[0.0; FEATURES + 1]; FEATURES];
        for (z, product) in standardized.iter().zip(rows) {
            let residual = product.price - mean_price;
            for (row, zr) in system.iter_mut().zip(z) {
                for (cell, zc) in row.iter_mut().zip(z) {
                    *cell += zr * zc;
                }
                if let Some(rhs) = row.last_mut() {
                    *rhs += zr * residual;
                }
            }
        }

        let coefficients = solve(system).ok_or(FitError::Singular)?;

        Ok(Self {
            intercept: mean_price,
            coefficients,
            means,
            scales,
        })
    }

    /// Predict a price for a product.
    #[must_use]
    pub fn predict(&self, product: &Product) -> f64 {
        let z = standardize(&features(product), &self.means, &self.scales);
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(z)
                .map(|(beta, value)| beta * value)
                .sum::<f64>()
    }
}

fn features(product: &Product) -> [f64; FEATURES] {
    [
        product.rating,
        f64::from(product.sales),
        f64::from(product.category_id.as_i32()),
    ]
}

fn standardize(
    x: &[f64; FEATURES],
    means: &[f64; FEATURES],
    scales: &[f64; FEATURES],
) -> [f64; FEATURES] {
    let mut z = [0.0; FEATURES];
    for (((out, value), mean), scale) in z.iter_mut().zip(x).zip(means).zip(scales) {
        *out = (value - mean) / scale;
    }
    z
}

/// Gauss-Jordan elimination with partial pivoting.
#[allow(clippy::indexing_slicing)] // all indices are bounded by FEATURES
fn solve(mut m: [[f64; FEATURES + 1]; FEATURES]) -> Option<[f64; FEATURES]> {
    for col in 0..FEATURES {
        let pivot = (col..FEATURES).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot][col].abs() < SINGULAR_EPSILON {
            return None;
        }
        m.swap(col, pivot);

        for row in 0..FEATURES {
            if row == col {
                continue;
            }
            let factor = m[row][col] / m[col][col];
            for k in col..=FEATURES {
                let delta = factor * m[col][k];
                m[row][k] -= delta;
            }
        }
    }

    let mut solution = [0.0; FEATURES];
    for (i, value) in solution.iter_mut().enumerate() {
        *value = m[i][FEATURES] / m[i][i];
    }
    Some(solution)
}

/// Where a recommended price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PricingBasis {
    Model,
    CategoryAverage { peers: usize },
    Markup,
}

impl fmt::Display for PricingBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => f.write_str("regression model"),
            Self::CategoryAverage { peers } => write!(f, "average of {peers} category peers"),
            Self::Markup => f.write_str("10% markup on current price"),
        }
    }
}

/// A recommended price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRecommendation {
    pub price: f64,
    pub basis: PricingBasis,
}

/// Applies the recommendation policy against a reference dataset.
#[derive(Debug, Clone, Copy)]
pub struct PriceAdvisor<'a> {
    model: Option<&'a LinearPriceModel>,
    reference: &'a [Product],
}

impl<'a> PriceAdvisor<'a> {
    #[must_use]
    pub const fn new(model: Option<&'a LinearPriceModel>, reference: &'a [Product]) -> Self {
        Self { model, reference }
    }

    /// Recommend a price for `product`.
    #[must_use]
    pub fn recommend(&self, product: &Product) -> PriceRecommendation {
        if let Some(model) = self.model {
            return PriceRecommendation {
                price: model.predict(product),
                basis: PricingBasis::Model,
            };
        }

        let peers: Vec<f64> = self
            .reference
            .iter()
            .filter(|p| p.category_id == product.category_id && p.id != product.id)
            .map(|p| p.price)
            .collect();

        if peers.is_empty() {
            return PriceRecommendation {
                price: product.price * FALLBACK_MARKUP,
                basis: PricingBasis::Markup,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let average = peers.iter().sum::<f64>() / peers.len() as f64;
        PriceRecommendation {
            price: average * CATEGORY_DISCOUNT,
            basis: PricingBasis::CategoryAverage { peers: peers.len() },
        }
    }
}
