//! Shared rounding convention
//!
//! Currency amounts are rounded to whole units and percentages to two
//! decimals, both with ties going up (toward +infinity), which is what the
//! web layer's `Math.round` does. Derived fields are rounded independently
//! from unrounded values, so identities like `returns = final - invested`
//! can drift by one unit.

/// Round to the nearest whole unit, ties toward +infinity
///
/// NaN and infinities pass through unchanged.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round a percentage to two decimal places, ties toward +infinity
pub fn round2(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

/// Convert an annual percentage rate to a monthly fraction (12% -> 0.01)
pub fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 12.0 / 100.0
}
