//! Recurring deposit maturity
//!
//! Banks compound RDs quarterly; each monthly instalment earns interest for
//! the months it stays deposited:
//!
//! `M = sum over k in 1..=N of R x (1 + r/400)^(4k/12)`, with `k` the months
//! remaining for that instalment.

use serde::{Deserialize, Serialize};

use super::months_in;
use crate::rounding::round_half_up;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdResult {
    pub maturity_value: f64,
    pub total_deposited: f64,
    pub total_interest: f64,
    pub yearly: Vec<RdYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdYear {
    pub year: u32,
    pub deposited: f64,
    /// Maturity value of the deposit had it been closed at this year end
    pub value: f64,
}

/// Unrounded maturity of `months` instalments, quarterly compounding
fn maturity(monthly_deposit: f64, annual_rate_pct: f64, months: u32) -> f64 {
    let quarterly = 1.0 + annual_rate_pct / 400.0;
    (1..=months)
        .map(|k| monthly_deposit * quarterly.powf(4.0 * k as f64 / 12.0))
        .sum()
}

pub fn calculate_rd(monthly_deposit: f64, annual_rate_pct: f64, tenure_months: u32) -> RdResult {
    let value = maturity(monthly_deposit, annual_rate_pct, tenure_months);
    let deposited = monthly_deposit * tenure_months as f64;

    let yearly = (1..=tenure_months.div_ceil(12))
        .map(|year| {
            let months = months_in(year).min(tenure_months);
            RdYear {
                year,
                deposited: round_half_up(monthly_deposit * months as f64),
                value: round_half_up(maturity(monthly_deposit, annual_rate_pct, months)),
            }
        })
        .collect();

    RdResult {
        maturity_value: round_half_up(value),
        total_deposited: round_half_up(deposited),
        total_interest: round_half_up(value - deposited),
        yearly,
    }
}
