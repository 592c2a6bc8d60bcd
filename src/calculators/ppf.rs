//! Public Provident Fund maturity
//!
//! The yearly deposit is made at the start of the financial year and
//! interest compounds annually.

use serde::{Deserialize, Serialize};

use crate::rounding::round_half_up;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfResult {
    pub maturity_value: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub yearly: Vec<PpfYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfYear {
    pub year: u32,
    pub opening_balance: f64,
    pub deposit: f64,
    pub interest: f64,
    pub closing_balance: f64,
}

pub fn calculate_ppf(yearly_deposit: f64, annual_rate_pct: f64, years: u32) -> PpfResult {
    let rate = annual_rate_pct / 100.0;

    let mut balance = 0.0;
    let mut yearly = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let opening = balance;
        let interest = (opening + yearly_deposit) * rate;
        balance = opening + yearly_deposit + interest;

        yearly.push(PpfYear {
            year,
            opening_balance: round_half_up(opening),
            deposit: round_half_up(yearly_deposit),
            interest: round_half_up(interest),
            closing_balance: round_half_up(balance),
        });
    }

    let invested = yearly_deposit * years as f64;

    PpfResult {
        maturity_value: round_half_up(balance),
        total_invested: round_half_up(invested),
        total_interest: round_half_up(balance - invested),
        yearly,
    }
}
