//! Sales forecasting.

/// Growth added per forecast month, relative to the last observed month.
pub const MONTHLY_GROWTH: f64 = 0.1;

/// Forecast months offered by the dashboard slider.
pub const FORECAST_MONTHS: std::ops::RangeInclusive<u32> = 1..=6;

/// Default forecast horizon.
pub const DEFAULT_FORECAST_MONTHS: u32 = 3;

/// Project sales forward from the last observation.
///
/// Month `i` (1-based) is `last * (1 + i * 0.1)`. An empty history has
/// nothing to project from and yields no points.
#[must_use]
pub fn forecast_sales(history: &[u32], months: u32) -> Vec<f64> {
    let Some(&last) = history.last() else {
        return Vec::new();
    };
    let last = f64::from(last);
    (1..=months)
        .map(|i| last * f64::from(i).mul_add(MONTHLY_GROWTH, 1.0))
        .collect()
}

/// Clamp a requested horizon to the slider range.
#[must_use]
pub fn forecast_horizon(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_FORECAST_MONTHS)
        .clamp(*FORECAST_MONTHS.start(), *FORECAST_MONTHS.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_grows_from_last_month() {
        let forecast = forecast_sales(&[120, 145, 98, 167, 210], 3);
        let expected = [231.0, 252.0, 273.0];
        assert_eq!(forecast.len(), 3);
        for (got, want) in forecast.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn test_forecast_empty_history() {
        assert!(forecast_sales(&[], 3).is_empty());
    }

    #[test]
    fn test_forecast_zero_months() {
        assert!(forecast_sales(&[100], 0).is_empty());
    }

    #[test]
    fn test_horizon_clamped() {
        assert_eq!(forecast_horizon(None), 3);
        assert_eq!(forecast_horizon(Some(0)), 1);
        assert_eq!(forecast_horizon(Some(12)), 6);
        assert_eq!(forecast_horizon(Some(4)), 4);
    }
}
