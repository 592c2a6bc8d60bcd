//! Compound annual growth rate between two values

use serde::{Deserialize, Serialize};

use crate::rounding::{round2, round_half_up};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrResult {
    /// Annualised growth (%)
    pub cagr: f64,
    /// Total growth over the period (%)
    pub absolute_return: f64,
    pub gain: f64,
}

/// CAGR from `initial_value` to `final_value` over `years`
///
/// Same degenerate policy as the NAV calculator: a non-positive starting
/// value or period gives an all-zero result.
pub fn calculate_cagr(initial_value: f64, final_value: f64, years: f64) -> CagrResult {
    if initial_value <= 0.0 || years <= 0.0 {
        return CagrResult::default();
    }

    let ratio = final_value / initial_value;

    CagrResult {
        cagr: round2((ratio.powf(1.0 / years) - 1.0) * 100.0),
        absolute_return: round2((ratio - 1.0) * 100.0),
        gain: round_half_up(final_value - initial_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling() {
        let result = calculate_cagr(100_000.0, 200_000.0, 5.0);

        assert_eq!(result.cagr, 14.87);
        assert_eq!(result.absolute_return, 100.0);
        assert_eq!(result.gain, 100_000.0);
    }

    #[test]
    fn test_matches_lumpsum_rate() {
        let grown = crate::calculators::lumpsum::calculate_lumpsum(50_000.0, 11.0, 8.0);
        let result = calculate_cagr(50_000.0, grown.final_amount, 8.0);

        assert!((result.cagr - 11.0).abs() < 0.01);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(calculate_cagr(0.0, 100.0, 3.0), CagrResult::default());
        assert_eq!(calculate_cagr(100.0, 150.0, 0.0), CagrResult::default());
    }
}
