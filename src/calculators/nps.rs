//! National Pension System: corpus at retirement, lump sum and pension
//!
//! Monthly contributions accumulate until retirement like a SIP. At exit the
//! corpus splits into an annuity purchase (at least 40%) and a tax-free lump
//! sum; the annuity pays a monthly pension at the annuity rate.

use serde::{Deserialize, Serialize};

use super::months_in;
use super::sip::sip_future_value;
use crate::rounding::round_half_up;

/// Inputs for a single NPS projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsInput {
    pub monthly_contribution: f64,

    pub current_age: u32,

    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,

    /// Expected return during accumulation (annual %)
    #[serde(default = "default_expected_return")]
    pub expected_return_pct: f64,

    /// Share of the corpus used to buy an annuity (%)
    #[serde(default = "default_annuity_pct")]
    pub annuity_pct: f64,

    /// Annuity payout rate (annual %)
    #[serde(default = "default_annuity_rate")]
    pub annuity_rate_pct: f64,

    /// When set, results are also shown in today's money
    #[serde(default)]
    pub inflation_pct: Option<f64>,
}

fn default_retirement_age() -> u32 { 60 }
fn default_expected_return() -> f64 { 10.0 }
fn default_annuity_pct() -> f64 { 40.0 }
fn default_annuity_rate() -> f64 { 6.0 }

impl Default for NpsInput {
    fn default() -> Self {
        Self {
            monthly_contribution: 5_000.0,
            current_age: 30,
            retirement_age: 60,
            expected_return_pct: 10.0,
            annuity_pct: 40.0,
            annuity_rate_pct: 6.0,
            inflation_pct: None,
        }
    }
}

impl NpsInput {
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsResult {
    pub total_invested: f64,
    pub total_corpus: f64,
    pub interest_earned: f64,
    pub lump_sum: f64,
    pub annuity_corpus: f64,
    pub monthly_pension: f64,
    /// Present-day equivalents, only with an inflation rate
    pub inflation_adjusted: Option<NpsInflationAdjusted>,
    pub yearly: Vec<NpsYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsInflationAdjusted {
    pub lump_sum: f64,
    pub monthly_pension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsYear {
    pub year: u32,
    pub age: u32,
    pub invested: f64,
    pub corpus: f64,
}

pub fn calculate_nps(input: &NpsInput) -> NpsResult {
    let years = input.years_to_retirement();
    let months = months_in(years);

    let corpus = sip_future_value(input.monthly_contribution, input.expected_return_pct, months);
    let invested = input.monthly_contribution * months as f64;
    let annuity_corpus = corpus * input.annuity_pct / 100.0;
    let lump_sum = corpus - annuity_corpus;
    let monthly_pension = annuity_corpus * input.annuity_rate_pct / 100.0 / 12.0;

    let inflation_adjusted = input.inflation_pct.map(|inflation| {
        let deflator = (1.0 + inflation / 100.0).powf(years as f64);
        NpsInflationAdjusted {
            lump_sum: round_half_up(lump_sum / deflator),
            monthly_pension: round_half_up(monthly_pension / deflator),
        }
    });

    let yearly = (1..=years)
        .map(|year| NpsYear {
            year,
            age: input.current_age.saturating_add(year),
            invested: round_half_up(input.monthly_contribution * months_in(year) as f64),
            corpus: round_half_up(sip_future_value(
                input.monthly_contribution,
                input.expected_return_pct,
                months_in(year),
            )),
        })
        .collect();

    NpsResult {
        total_invested: round_half_up(invested),
        total_corpus: round_half_up(corpus),
        interest_earned: round_half_up(corpus - invested),
        lump_sum: round_half_up(lump_sum),
        annuity_corpus: round_half_up(annuity_corpus),
        monthly_pension: round_half_up(monthly_pension),
        inflation_adjusted,
        yearly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_projection() {
        let result = calculate_nps(&NpsInput::default());

        assert_eq!(result.total_invested, 1_800_000.0);
        assert_eq!(result.total_corpus, 11_396_627.0);
        assert_eq!(result.annuity_corpus, 4_558_651.0);
        assert_eq!(result.lump_sum, 6_837_976.0);
        assert_eq!(result.monthly_pension, 22_793.0);
        assert!(result.inflation_adjusted.is_none());
        assert_eq!(result.yearly.len(), 30);
        assert_eq!(result.yearly[29].age, 60);
        assert_eq!(result.yearly[29].corpus, result.total_corpus);
    }

    #[test]
    fn test_split_adds_up() {
        let input = NpsInput { annuity_pct: 55.0, ..NpsInput::default() };
        let result = calculate_nps(&input);

        assert!((result.lump_sum + result.annuity_corpus - result.total_corpus).abs() <= 1.0);
    }

    #[test]
    fn test_inflation_adjustment() {
        let input = NpsInput { inflation_pct: Some(6.0), ..NpsInput::default() };
        let result = calculate_nps(&input);
        let adjusted = result.inflation_adjusted.unwrap();

        let deflator = 1.06_f64.powi(30);
        assert!((adjusted.monthly_pension - result.monthly_pension / deflator).abs() <= 1.0);
        assert!(adjusted.lump_sum < result.lump_sum);
    }

    #[test]
    fn test_already_retired() {
        let input = NpsInput { current_age: 62, ..NpsInput::default() };
        let result = calculate_nps(&input);

        assert_eq!(result.total_corpus, 0.0);
        assert_eq!(result.monthly_pension, 0.0);
        assert!(result.yearly.is_empty());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let input: NpsInput =
            serde_json::from_str(r#"{ "monthlyContribution": 10000, "currentAge": 35 }"#).unwrap();

        assert_eq!(input.retirement_age, 60);
        assert_eq!(input.annuity_pct, 40.0);
        assert_eq!(input.inflation_pct, None);
        assert_eq!(input.years_to_retirement(), 25);
    }
}
