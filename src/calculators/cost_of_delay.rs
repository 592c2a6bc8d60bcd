//! Cost of delaying a SIP
//!
//! Compares starting a monthly SIP now against starting it `delay_months`
//! later with the same end date.

use serde::{Deserialize, Serialize};

use super::months_in;
use super::sip::{required_monthly_sip, sip_future_value};
use crate::rounding::{round2, round_half_up};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfDelayResult {
    pub corpus_if_started_now: f64,
    pub corpus_if_delayed: f64,
    /// Corpus given up by waiting
    pub cost_of_delay: f64,
    /// `cost_of_delay` as a share of the on-time corpus (%)
    pub loss_pct: f64,
    pub invested_if_started_now: f64,
    pub invested_if_delayed: f64,
    /// Monthly SIP the late starter needs to end with the on-time corpus;
    /// 0 when the delay uses up the whole horizon
    pub required_sip_to_catch_up: f64,
}

pub fn calculate_cost_of_delay(
    monthly_sip: f64,
    investment_years: u32,
    annual_return_pct: f64,
    delay_months: u32,
) -> CostOfDelayResult {
    let horizon = months_in(investment_years);
    let delayed_months = horizon.saturating_sub(delay_months);

    let on_time = sip_future_value(monthly_sip, annual_return_pct, horizon);
    let delayed = sip_future_value(monthly_sip, annual_return_pct, delayed_months);
    let cost = on_time - delayed;
    let catch_up = required_monthly_sip(on_time, annual_return_pct, delayed_months);

    CostOfDelayResult {
        corpus_if_started_now: round_half_up(on_time),
        corpus_if_delayed: round_half_up(delayed),
        cost_of_delay: round_half_up(cost),
        loss_pct: if on_time > 0.0 { round2(cost / on_time * 100.0) } else { 0.0 },
        invested_if_started_now: round_half_up(monthly_sip * horizon as f64),
        invested_if_delayed: round_half_up(monthly_sip * delayed_months as f64),
        required_sip_to_catch_up: round_half_up(catch_up),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_year_delay() {
        let result = calculate_cost_of_delay(10_000.0, 20, 12.0, 12);

        assert_eq!(result.corpus_if_started_now, 9_991_479.0);
        assert_eq!(result.corpus_if_delayed, 8_753_254.0);
        assert_eq!(result.cost_of_delay, 1_238_225.0);
        assert_eq!(result.loss_pct, 12.39);
        assert_eq!(result.invested_if_delayed, 2_280_000.0);
        assert!(result.required_sip_to_catch_up > 10_000.0);
    }

    #[test]
    fn test_no_delay() {
        let result = calculate_cost_of_delay(5_000.0, 10, 10.0, 0);

        assert_eq!(result.cost_of_delay, 0.0);
        assert_eq!(result.loss_pct, 0.0);
        assert_eq!(result.required_sip_to_catch_up, 5_000.0);
    }

    #[test]
    fn test_delay_beyond_horizon() {
        let result = calculate_cost_of_delay(5_000.0, 2, 10.0, 36);

        assert_eq!(result.corpus_if_delayed, 0.0);
        assert_eq!(result.cost_of_delay, result.corpus_if_started_now);
        assert_eq!(result.loss_pct, 100.0);
        assert_eq!(result.required_sip_to_catch_up, 0.0);
    }

    #[test]
    fn test_huge_horizon_saturates() {
        let result = calculate_cost_of_delay(1_000.0, u32::MAX, 0.0, 12);

        assert_eq!(result.invested_if_started_now, 1_000.0 * u32::MAX as f64);
        assert_eq!(result.cost_of_delay, 12_000.0);
        assert_eq!(result.required_sip_to_catch_up, 1_000.0);
    }

    #[test]
    fn test_cost_grows_with_delay() {
        let short = calculate_cost_of_delay(10_000.0, 15, 11.0, 6);
        let long = calculate_cost_of_delay(10_000.0, 15, 11.0, 36);

        assert!(short.cost_of_delay > 0.0);
        assert!(long.cost_of_delay > short.cost_of_delay);
        assert!(long.required_sip_to_catch_up > short.required_sip_to_catch_up);
    }
}
