//! Fixed deposit maturity with periodic compounding
//!
//! `A = P x (1 + r/m)^(m x t)` where `m` is the number of compounding
//! periods per year.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rounding::{round2, round_half_up};

/// How often interest is credited to the deposit
///
/// Serializes as its kebab-case name. Deserializes from any name `FromStr`
/// accepts, or from the number of periods per year (`12`, `4`, `2`, `1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "FrequencyInput")]
pub enum CompoundingFrequency {
    Monthly,
    #[default]
    Quarterly,
    HalfYearly,
    Yearly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::HalfYearly => 2,
            Self::Yearly => 1,
        }
    }

    pub fn from_periods(periods: u32) -> Result<Self, String> {
        match periods {
            12 => Ok(Self::Monthly),
            4 => Ok(Self::Quarterly),
            2 => Ok(Self::HalfYearly),
            1 => Ok(Self::Yearly),
            other => Err(format!("unsupported compounding periods per year: {other}")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half-yearly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(periods) = s.parse::<u32>() {
            return Self::from_periods(periods);
        }
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "half-yearly" | "halfyearly" | "half_yearly" => Ok(Self::HalfYearly),
            "yearly" | "annually" | "annual" => Ok(Self::Yearly),
            other => Err(format!("unknown compounding frequency '{other}'")),
        }
    }
}

/// Wire forms accepted for a compounding frequency
#[derive(Deserialize)]
#[serde(untagged)]
enum FrequencyInput {
    Periods(u32),
    Name(String),
}

impl TryFrom<FrequencyInput> for CompoundingFrequency {
    type Error = String;

    fn try_from(input: FrequencyInput) -> Result<Self, Self::Error> {
        match input {
            FrequencyInput::Periods(periods) => Self::from_periods(periods),
            FrequencyInput::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdResult {
    pub maturity_amount: f64,
    pub principal: f64,
    pub total_interest: f64,
    /// Annual yield after compounding (%)
    pub effective_annual_rate: f64,
    pub yearly: Vec<FdYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdYear {
    pub year: u32,
    pub interest_earned: f64,
    pub balance: f64,
}

fn maturity(principal: f64, annual_rate_pct: f64, years: f64, frequency: CompoundingFrequency) -> f64 {
    let m = frequency.periods_per_year() as f64;
    principal * (1.0 + annual_rate_pct / 100.0 / m).powf(m * years)
}

/// Deposit of `principal` for `years` (may be fractional)
///
/// The yearly rows cover each completed year; a fractional tail shows up
/// only in the headline figures.
pub fn calculate_fd(
    principal: f64,
    annual_rate_pct: f64,
    years: f64,
    frequency: CompoundingFrequency,
) -> FdResult {
    let amount = maturity(principal, annual_rate_pct, years, frequency);
    let effective = (maturity(1.0, annual_rate_pct, 1.0, frequency) - 1.0) * 100.0;

    let whole_years = if years > 0.0 { years.floor() as u32 } else { 0 };
    let yearly = (1..=whole_years)
        .map(|year| {
            let balance = maturity(principal, annual_rate_pct, year as f64, frequency);
            FdYear {
                year,
                interest_earned: round_half_up(balance - principal),
                balance: round_half_up(balance),
            }
        })
        .collect();

    FdResult {
        maturity_amount: round_half_up(amount),
        principal: round_half_up(principal),
        total_interest: round_half_up(amount - principal),
        effective_annual_rate: round2(effective),
        yearly,
    }
}
