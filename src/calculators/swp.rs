//! Systematic Withdrawal Plan simulation
//!
//! A fixed amount is withdrawn at the start of every month and whatever is
//! left grows at the monthly rate. There is no closed form that also tells
//! when the money runs out, so the corpus is carried month by month and the
//! simulation stops early on depletion.

use serde::{Deserialize, Serialize};

use super::months_in;
use crate::rounding::{monthly_rate, round_half_up};

/// How the plan ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SwpOutcome {
    /// Every withdrawal over the horizon was paid in full, even if that
    /// leaves the corpus at exactly zero after the final month
    Survives { years: u32 },
    /// A withdrawal fell short, or the corpus hit zero with months still
    /// to go; `month` is 1-based
    Depleted { month: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub initial_corpus: f64,
    pub total_withdrawn: f64,
    pub total_returns: f64,
    pub final_value: f64,
    pub outcome: SwpOutcome,
    pub yearly: Vec<SwpYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpYear {
    pub year: u32,
    pub opening_balance: f64,
    pub withdrawn: f64,
    pub returns: f64,
    pub closing_balance: f64,
}

/// Running totals for the current simulation year
#[derive(Debug, Default)]
struct YearAccumulator {
    opening: f64,
    withdrawn: f64,
    returns: f64,
}

impl YearAccumulator {
    fn close(&self, year: u32, balance: f64) -> SwpYear {
        SwpYear {
            year,
            opening_balance: round_half_up(self.opening),
            withdrawn: round_half_up(self.withdrawn),
            returns: round_half_up(self.returns),
            closing_balance: round_half_up(balance),
        }
    }
}

pub fn simulate_swp(
    initial_corpus: f64,
    monthly_withdrawal: f64,
    annual_return_pct: f64,
    years: u32,
) -> SwpResult {
    let i = monthly_rate(annual_return_pct);
    let months = months_in(years);

    let mut balance = initial_corpus;
    let mut total_withdrawn = 0.0;
    let mut total_returns = 0.0;
    let mut depleted_at = None;
    let mut yearly = Vec::new();
    let mut current = YearAccumulator { opening: balance, ..Default::default() };

    for month in 1..=months {
        let withdrawal = monthly_withdrawal.min(balance);
        balance -= withdrawal;

        let growth = balance * i;
        balance += growth;

        total_withdrawn += withdrawal;
        total_returns += growth;
        current.withdrawn += withdrawal;
        current.returns += growth;

        let exhausted = withdrawal < monthly_withdrawal || (balance <= 0.0 && month < months);

        if month % 12 == 0 || exhausted {
            yearly.push(current.close(month.div_ceil(12), balance));
            current = YearAccumulator { opening: balance, ..Default::default() };
        }

        if exhausted {
            depleted_at = Some(month);
            break;
        }
    }

    let outcome = match depleted_at {
        Some(month) => {
            log::debug!("SWP corpus {} depleted in month {}", initial_corpus, month);
            SwpOutcome::Depleted { month }
        }
        None => SwpOutcome::Survives { years },
    };

    SwpResult {
        initial_corpus: round_half_up(initial_corpus),
        total_withdrawn: round_half_up(total_withdrawn),
        total_returns: round_half_up(total_returns),
        final_value: round_half_up(balance),
        outcome,
        yearly,
    }
}
