//! Goal planning: what it takes to afford a future expense
//!
//! The goal is priced in today's money, inflated to the target year, and
//! then solved for either a monthly SIP or a one-time investment.

use serde::{Deserialize, Serialize};

use super::months_in;
use super::sip::{required_monthly_sip, sip_future_value};
use crate::rounding::{round2, round_half_up};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanResult {
    /// Goal cost in today's money
    pub target_today: f64,
    /// Goal cost in the target year
    pub future_cost: f64,
    /// Monthly SIP that reaches `future_cost`
    pub monthly_sip: f64,
    /// One-time investment today that reaches `future_cost`
    pub lumpsum_today: f64,
    pub total_sip_investment: f64,
    pub yearly: Vec<GoalYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalYear {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    /// Share of the future cost reached (%)
    pub progress_pct: f64,
}

pub fn plan_goal(
    target_today: f64,
    years: u32,
    expected_return_pct: f64,
    inflation_pct: f64,
) -> GoalPlanResult {
    let future_cost = target_today * (1.0 + inflation_pct / 100.0).powf(years as f64);
    let months = months_in(years);
    let sip = required_monthly_sip(future_cost, expected_return_pct, months);
    let lumpsum = future_cost / (1.0 + expected_return_pct / 100.0).powf(years as f64);

    let yearly = (1..=years)
        .map(|year| {
            let value = sip_future_value(sip, expected_return_pct, months_in(year));
            GoalYear {
                year,
                invested: round_half_up(sip * months_in(year) as f64),
                value: round_half_up(value),
                progress_pct: if future_cost > 0.0 {
                    round2(value / future_cost * 100.0)
                } else {
                    0.0
                },
            }
        })
        .collect();

    GoalPlanResult {
        target_today: round_half_up(target_today),
        future_cost: round_half_up(future_cost),
        monthly_sip: round_half_up(sip),
        lumpsum_today: round_half_up(lumpsum),
        total_sip_investment: round_half_up(sip * months as f64),
        yearly,
    }
}
