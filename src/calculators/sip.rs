//! Systematic Investment Plan (monthly) growth
//!
//! Contributions are made at the start of each month (annuity due):
//!
//! `FV = P x ((1 + i)^n - 1) / i x (1 + i)`, `i = r / 12 / 100`, `n = months`

use serde::{Deserialize, Serialize};

use super::months_in;
use crate::rounding::{monthly_rate, round_half_up};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYearlyBreakdown {
    pub year: u32,
    pub invested: f64,
    pub returns: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpSipResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    /// Monthly contribution in the final year
    pub final_monthly_investment: f64,
    pub yearly: Vec<StepUpSipYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpSipYear {
    pub year: u32,
    pub monthly_investment: f64,
    pub invested: f64,
    pub total_value: f64,
}

/// Unrounded future value of `months` start-of-month contributions
pub fn sip_future_value(monthly_investment: f64, annual_return_pct: f64, months: u32) -> f64 {
    let i = monthly_rate(annual_return_pct);
    let n = months as f64;

    if i == 0.0 {
        return monthly_investment * n;
    }

    monthly_investment * ((1.0 + i).powf(n) - 1.0) / i * (1.0 + i)
}

/// Monthly contribution needed for `target` after `months` (inverse of
/// [`sip_future_value`])
pub fn required_monthly_sip(target: f64, annual_return_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }

    let i = monthly_rate(annual_return_pct);
    let n = months as f64;

    if i == 0.0 {
        return target / n;
    }

    target * i / (((1.0 + i).powf(n) - 1.0) * (1.0 + i))
}

pub fn calculate_sip(monthly_investment: f64, annual_return_pct: f64, years: u32) -> SipResult {
    let months = months_in(years);
    let value = sip_future_value(monthly_investment, annual_return_pct, months);
    let invested = monthly_investment * months as f64;

    SipResult {
        invested_amount: round_half_up(invested),
        estimated_returns: round_half_up(value - invested),
        total_value: round_half_up(value),
    }
}

/// Closed-form value at the end of each year 1..=years
pub fn calculate_sip_yearly_breakdown(
    monthly_investment: f64,
    annual_return_pct: f64,
    years: u32,
) -> Vec<SipYearlyBreakdown> {
    (1..=years)
        .map(|year| {
            let sip = calculate_sip(monthly_investment, annual_return_pct, year);
            SipYearlyBreakdown {
                year,
                invested: sip.invested_amount,
                returns: sip.estimated_returns,
                total_value: sip.total_value,
            }
        })
        .collect()
}

/// SIP whose monthly amount rises by `annual_step_up_pct` every year
///
/// No closed form once the contribution changes, so this runs month by
/// month: credit the contribution, then compound the whole corpus.
pub fn calculate_step_up_sip(
    monthly_investment: f64,
    annual_step_up_pct: f64,
    annual_return_pct: f64,
    years: u32,
) -> StepUpSipResult {
    let i = monthly_rate(annual_return_pct);
    let step_up = 1.0 + annual_step_up_pct / 100.0;

    let mut corpus = 0.0;
    let mut invested = 0.0;
    let mut contribution = monthly_investment;
    let mut yearly = Vec::with_capacity(years as usize);

    for year in 1..=years {
        if year > 1 {
            contribution *= step_up;
        }
        for _ in 0..12 {
            corpus = (corpus + contribution) * (1.0 + i);
            invested += contribution;
        }
        yearly.push(StepUpSipYear {
            year,
            monthly_investment: round_half_up(contribution),
            invested: round_half_up(invested),
            total_value: round_half_up(corpus),
        });
    }

    log::debug!(
        "step-up SIP: {} years, final contribution {:.2}, corpus {:.2}",
        years,
        contribution,
        corpus
    );

    StepUpSipResult {
        invested_amount: round_half_up(invested),
        estimated_returns: round_half_up(corpus - invested),
        total_value: round_half_up(corpus),
        final_monthly_investment: round_half_up(if years == 0 { 0.0 } else { contribution }),
        yearly,
    }
}
