//! Loan EMI and amortization
//!
//! `EMI = P x i x (1 + i)^N / ((1 + i)^N - 1)` with `i` the monthly rate and
//! `N` the tenure in months. A zero rate splits the principal evenly.

use serde::{Deserialize, Serialize};

use crate::rounding::{monthly_rate, round_half_up};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub emi: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub principal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

/// Unrounded monthly instalment
pub fn monthly_instalment(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }

    let i = monthly_rate(annual_rate_pct);
    let n = tenure_months as f64;

    if i == 0.0 {
        return principal / n;
    }

    let factor = (1.0 + i).powf(n);
    principal * i * factor / (factor - 1.0)
}

pub fn calculate_emi(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> EmiResult {
    let emi = monthly_instalment(principal, annual_rate_pct, tenure_months);
    let total_payment = emi * tenure_months as f64;

    EmiResult {
        emi: round_half_up(emi),
        total_interest: round_half_up(total_payment - principal),
        total_payment: round_half_up(total_payment),
        principal: round_half_up(principal),
    }
}

/// Year-by-year split of repayments into principal and interest
///
/// Runs the loan month by month with the unrounded instalment. The last
/// month's principal is whatever is left so the balance closes at zero.
pub fn calculate_amortization_schedule(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
) -> Vec<AmortizationYear> {
    let i = monthly_rate(annual_rate_pct);
    let emi = monthly_instalment(principal, annual_rate_pct, tenure_months);

    let mut balance = principal;
    let mut schedule = Vec::with_capacity((tenure_months as usize).div_ceil(12));
    let mut year_principal = 0.0;
    let mut year_interest = 0.0;

    for month in 1..=tenure_months {
        let interest = balance * i;
        let principal_part = if month == tenure_months {
            balance
        } else {
            (emi - interest).min(balance)
        };

        balance = (balance - principal_part).max(0.0);
        year_principal += principal_part;
        year_interest += interest;

        if month % 12 == 0 || month == tenure_months {
            schedule.push(AmortizationYear {
                year: month.div_ceil(12),
                principal_paid: round_half_up(year_principal),
                interest_paid: round_half_up(year_interest),
                closing_balance: round_half_up(balance),
            });
            year_principal = 0.0;
            year_interest = 0.0;
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_loan() {
        let result = calculate_emi(5_000_000.0, 8.5, 240);

        assert_eq!(result.emi, 43_391.0);
        assert_eq!(result.principal, 5_000_000.0);
        assert!((result.total_payment - 43_391.2 * 240.0).abs() < 50.0);
        let drift = result.total_interest - (result.total_payment - result.principal);
        assert!(drift.abs() <= 1.0);
    }

    #[test]
    fn test_zero_rate() {
        let result = calculate_emi(120_000.0, 0.0, 12);

        assert_eq!(result.emi, 10_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_tenure() {
        let result = calculate_emi(120_000.0, 10.0, 0);
        assert_eq!(result.emi, 0.0);
        assert!(calculate_amortization_schedule(120_000.0, 10.0, 0).is_empty());
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = calculate_amortization_schedule(1_000_000.0, 10.0, 60);

        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.last().unwrap().closing_balance, 0.0);

        let principal: f64 = schedule.iter().map(|y| y.principal_paid).sum();
        assert!((principal - 1_000_000.0).abs() <= 5.0);

        let interest: f64 = schedule.iter().map(|y| y.interest_paid).sum();
        let expected = calculate_emi(1_000_000.0, 10.0, 60).total_interest;
        assert!((interest - expected).abs() <= 5.0);

        // Interest share falls as the balance shrinks
        assert!(schedule.windows(2).all(|w| w[1].interest_paid < w[0].interest_paid));
    }

    #[test]
    fn test_partial_final_year() {
        let schedule = calculate_amortization_schedule(300_000.0, 9.0, 30);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[2].year, 3);
        assert_eq!(schedule[2].closing_balance, 0.0);
    }
}
