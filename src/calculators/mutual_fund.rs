//! Mutual fund returns from purchase and current NAV
//!
//! Absolute return and CAGR are percentages at two decimals. The invested,
//! current and gain amounts are only filled in when a unit count is given.

use serde::{Deserialize, Serialize};

use crate::rounding::{round2, round_half_up};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfReturnsResult {
    /// Total return over the holding period (%)
    pub absolute_returns: f64,
    /// Annualised return (%)
    pub cagr: f64,
    pub invested_amount: f64,
    pub current_value: f64,
    pub total_gain: f64,
}

/// Returns for a holding bought at `purchase_nav`, now at `current_nav`
///
/// A non-positive purchase NAV or holding period gives an all-zero result.
/// That zero is a placeholder, not "no change". NAVs must be positive:
/// a negative `current_nav` makes the CAGR NaN.
pub fn calculate_mf_returns(
    purchase_nav: f64,
    current_nav: f64,
    holding_years: f64,
    units: Option<f64>,
) -> MfReturnsResult {
    if purchase_nav <= 0.0 || holding_years <= 0.0 {
        return MfReturnsResult::default();
    }

    let absolute = (current_nav - purchase_nav) / purchase_nav * 100.0;
    let cagr = ((current_nav / purchase_nav).powf(1.0 / holding_years) - 1.0) * 100.0;

    let (invested_amount, current_value, total_gain) = match units {
        Some(units) => {
            let invested = purchase_nav * units;
            let current = current_nav * units;
            (
                round_half_up(invested),
                round_half_up(current),
                round_half_up(current - invested),
            )
        }
        None => (0.0, 0.0, 0.0),
    };

    MfReturnsResult {
        absolute_returns: round2(absolute),
        cagr: round2(cagr),
        invested_amount,
        current_value,
        total_gain,
    }
}

/// Years and months as fractional years
pub fn to_decimal_years(years: f64, months: f64) -> f64 {
    years + months / 12.0
}

/// A holding period must be at least one month long
pub fn is_valid_holding_period(years: f64, months: f64) -> bool {
    years * 12.0 + months > 0.0
}
