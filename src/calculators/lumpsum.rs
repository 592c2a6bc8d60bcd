//! One-time (lumpsum) investment growth
//!
//! `final = P x (1 + r)^t` with annual compounding.

use serde::{Deserialize, Serialize};

use crate::rounding::round_half_up;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_returns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumYearlyBreakdown {
    pub year: u32,
    pub invested: f64,
    pub interest: f64,
    pub total_value: f64,
}

/// Unrounded value of `investment` after `years` at `annual_return_pct`
fn grow(investment: f64, annual_return_pct: f64, years: f64) -> f64 {
    investment * (1.0 + annual_return_pct / 100.0).powf(years)
}

/// Grow a single investment for `years` (may be fractional)
pub fn calculate_lumpsum(investment: f64, annual_return_pct: f64, years: f64) -> LumpsumResult {
    let final_value = grow(investment, annual_return_pct, years);

    LumpsumResult {
        final_amount: round_half_up(final_value),
        total_invested: round_half_up(investment),
        total_returns: round_half_up(final_value - investment),
    }
}

/// Value at the end of each year 1..=years
///
/// Each row is evaluated at its own horizon rather than carried forward, so
/// the last row is identical to [`calculate_lumpsum`] for the full term.
pub fn calculate_lumpsum_yearly_breakdown(
    investment: f64,
    annual_return_pct: f64,
    years: u32,
) -> Vec<LumpsumYearlyBreakdown> {
    (1..=years)
        .map(|year| {
            let value = grow(investment, annual_return_pct, year as f64);
            LumpsumYearlyBreakdown {
                year,
                invested: round_half_up(investment),
                interest: round_half_up(value - investment),
                total_value: round_half_up(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_growth() {
        let result = calculate_lumpsum(100_000.0, 12.0, 10.0);

        // 1.12^10 = 3.105848...
        assert_eq!(result.final_amount, 310_585.0);
        assert_eq!(result.total_invested, 100_000.0);
        assert_eq!(result.total_returns, 210_585.0);
    }

    #[test]
    fn test_returns_identity_within_one_unit() {
        for &(p, r, t) in &[
            (10_000.0, 7.5, 3.0),
            (123_456.0, 11.3, 17.0),
            (5_555.55, 9.99, 2.5),
            (1_000_000.0, 0.0, 20.0),
        ] {
            let result = calculate_lumpsum(p, r, t);
            let drift = result.total_returns - (result.final_amount - result.total_invested);
            assert!(drift.abs() <= 1.0, "drift {} for {:?}", drift, (p, r, t));
        }
    }

    #[test]
    fn test_rule_of_72() {
        let p = 250_000.0;
        let result = calculate_lumpsum(p, 7.2, 10.0);
        assert_relative_eq!(result.final_amount, 2.0 * p, max_relative = 0.01);
    }

    #[test]
    fn test_zero_years() {
        let result = calculate_lumpsum(50_000.0, 12.0, 0.0);
        assert_eq!(result.final_amount, 50_000.0);
        assert_eq!(result.total_returns, 0.0);
    }

    #[test]
    fn test_breakdown_shape() {
        let rows = calculate_lumpsum_yearly_breakdown(100_000.0, 12.0, 10);

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[0].total_value, 112_000.0);
        assert_eq!(rows[0].interest, 12_000.0);
        assert!(rows.iter().all(|r| r.invested == 100_000.0));
        assert!(rows.windows(2).all(|w| w[1].total_value > w[0].total_value));
    }

    #[test]
    fn test_breakdown_matches_final() {
        for years in [1u32, 5, 15, 30] {
            let rows = calculate_lumpsum_yearly_breakdown(75_000.0, 9.5, years);
            let last = rows.last().unwrap();
            let full = calculate_lumpsum(75_000.0, 9.5, years as f64);

            assert_eq!(last.total_value, full.final_amount);
            assert_eq!(last.interest, full.total_returns);
        }
    }

    #[test]
    fn test_breakdown_empty() {
        assert!(calculate_lumpsum_yearly_breakdown(10_000.0, 10.0, 0).is_empty());
    }
}
