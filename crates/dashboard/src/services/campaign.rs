//! Advertising budget split and market opportunity table.

use serde::Serialize;

/// Budget bounds offered by the optimizer.
pub const BUDGET_RANGE: std::ops::RangeInclusive<u32> = 50..=1000;

/// Budget used when none is given.
pub const DEFAULT_BUDGET: u32 = 200;

/// Share of an advertising budget assigned to one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub platform: String,
    pub share: f64,
    pub amount: f64,
}

/// Split a budget across ad platforms with fixed shares.
///
/// The budget is clamped to [`BUDGET_RANGE`]. The last platform is the
/// marketplace's own ad product.
#[must_use]
pub fn allocate_budget(budget: Option<u32>, marketplace: &str) -> Vec<Allocation> {
    let total = f64::from(
        budget
            .unwrap_or(DEFAULT_BUDGET)
            .clamp(*BUDGET_RANGE.start(), *BUDGET_RANGE.end()),
    );
    let marketplace_ads = format!("{marketplace} Ads");

    [
        ("Facebook", 0.4),
        ("Google", 0.3),
        ("TikTok", 0.2),
        (marketplace_ads.as_str(), 0.1),
    ]
    .into_iter()
    .map(|(platform, share)| Allocation {
        platform: platform.to_string(),
        share,
        amount: total * share,
    })
    .collect()
}

/// Demand or competition level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// A category worth entering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    pub category: &'static str,
    pub demand: Level,
    pub competition: Level,
}

/// Result of the market gap analysis.
#[must_use]
pub fn market_gaps() -> Vec<Opportunity> {
    vec![
        Opportunity {
            category: "Wireless Earbuds",
            demand: Level::High,
            competition: Level::Low,
        },
        Opportunity {
            category: "Yoga Mats",
            demand: Level::Medium,
            competition: Level::Low,
        },
        Opportunity {
            category: "Phone Lenses",
            demand: Level::High,
            competition: Level::Medium,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_split() {
        let split = allocate_budget(None, "Daraz");
        let amounts: Vec<f64> = split.iter().map(|a| a.amount).collect();
        assert_eq!(split.len(), 4);
        assert!((amounts.iter().sum::<f64>() - 200.0).abs() < 1e-9);
        assert!((amounts[0] - 80.0).abs() < 1e-9);
        assert_eq!(split[3].platform, "Daraz Ads");
    }

    #[test]
    fn test_budget_is_clamped() {
        let low: f64 = allocate_budget(Some(5), "Daraz").iter().map(|a| a.amount).sum();
        let high: f64 = allocate_budget(Some(50_000), "Daraz").iter().map(|a| a.amount).sum();
        assert!((low - 50.0).abs() < 1e-9);
        assert!((high - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_market_gaps_table() {
        let gaps = market_gaps();
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].category, "Wireless Earbuds");
        assert_eq!(gaps[2].competition, Level::Medium);
    }
}
