//! Gratuity under the Payment of Gratuity Act
//!
//! `gratuity = 15 x last drawn salary x years of service / 26`
//!
//! Eligibility (5 years of continuous service) is informational: the amount
//! is always computed and the caller decides how to present an ineligible
//! result.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assumptions::GratuityRules;
use crate::rounding::round_half_up;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratuityResult {
    /// Rounded gratuity payable
    pub gratuity_amount: f64,
    /// Last drawn basic salary + DA (monthly)
    pub last_drawn_salary: f64,
    pub years_of_service: f64,
    pub is_eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CappedGratuityResult {
    #[serde(flatten)]
    pub result: GratuityResult,
    /// True when the statutory ceiling reduced the amount
    pub is_capped: bool,
    /// Amount before the ceiling was applied
    pub uncapped_amount: f64,
}

/// Gratuity with the statutory formula
pub fn calculate_gratuity(last_drawn_salary: f64, years_of_service: f64) -> GratuityResult {
    GratuityRules::default().calculate(last_drawn_salary, years_of_service)
}

/// Gratuity clamped to the statutory ceiling (Rs 20 lakh)
pub fn calculate_gratuity_with_cap(last_drawn_salary: f64, years_of_service: f64) -> CappedGratuityResult {
    GratuityRules::default().calculate_with_cap(last_drawn_salary, years_of_service)
}

impl GratuityRules {
    pub fn calculate(&self, last_drawn_salary: f64, years_of_service: f64) -> GratuityResult {
        GratuityResult {
            gratuity_amount: round_half_up(self.raw_amount(last_drawn_salary, years_of_service)),
            last_drawn_salary,
            years_of_service,
            is_eligible: self.is_eligible(years_of_service),
        }
    }

    pub fn calculate_with_cap(&self, last_drawn_salary: f64, years_of_service: f64) -> CappedGratuityResult {
        let mut result = self.calculate(last_drawn_salary, years_of_service);
        let uncapped_amount = result.gratuity_amount;
        let is_capped = uncapped_amount > self.cap;

        if is_capped {
            log::debug!("gratuity {} capped at {}", uncapped_amount, self.cap);
            result.gratuity_amount = self.cap;
        }

        CappedGratuityResult {
            result,
            is_capped,
            uncapped_amount,
        }
    }
}

/// Completed years of service between joining and leaving
///
/// A trailing part-year of more than six months counts as a full year.
/// Returns 0 when `left` is before `joined`.
pub fn completed_service_years(joined: NaiveDate, left: NaiveDate) -> u32 {
    if left <= joined {
        return 0;
    }

    let mut months = (left.year() - joined.year()) * 12 + left.month() as i32 - joined.month() as i32;
    if left.day() < joined.day() {
        months -= 1;
    }
    let months = months.max(0) as u32;

    // Leftover days beyond the last whole month still count toward the
    // part-year, so exactly 6 months + a few days rounds up.
    let whole_years = months / 12;
    let remainder_months = months % 12;
    let has_extra_days = left.day() != joined.day();

    if remainder_months > 6 || (remainder_months == 6 && has_extra_days) {
        whole_years + 1
    } else {
        whole_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gratuity_formula() {
        let result = calculate_gratuity(50_000.0, 10.0);

        assert_eq!(result.gratuity_amount, 288_462.0);
        assert_eq!(result.last_drawn_salary, 50_000.0);
        assert_eq!(result.years_of_service, 10.0);
        assert!(result.is_eligible);
    }

    #[test]
    fn test_ineligible_still_computed() {
        let result = calculate_gratuity(26_000.0, 4.0);

        // 15 x 26000 x 4 / 26 = 60000
        assert_eq!(result.gratuity_amount, 60_000.0);
        assert!(!result.is_eligible);

        assert!(calculate_gratuity(26_000.0, 5.0).is_eligible);
    }

    #[test]
    fn test_zero_service() {
        let result = calculate_gratuity(40_000.0, 0.0);
        assert_eq!(result.gratuity_amount, 0.0);
        assert!(!result.is_eligible);
    }

    #[test]
    fn test_cap_applied() {
        let result = calculate_gratuity_with_cap(500_000.0, 25.0);

        assert_eq!(result.result.gratuity_amount, 2_000_000.0);
        assert!(result.is_capped);
        assert_eq!(result.uncapped_amount, 7_211_538.0);
        assert!(result.result.is_eligible);
    }

    #[test]
    fn test_cap_not_applied() {
        let result = calculate_gratuity_with_cap(50_000.0, 10.0);

        assert_eq!(result.result.gratuity_amount, 288_462.0);
        assert!(!result.is_capped);
        assert_eq!(result.uncapped_amount, 288_462.0);
    }

    #[test]
    fn test_formula_across_inputs() {
        for salary in [10_000.0, 33_333.0, 75_500.0, 120_000.0] {
            for years in [0.0, 1.0, 4.5, 5.0, 12.0, 30.0] {
                let result = calculate_gratuity(salary, years);
                assert_eq!(result.gratuity_amount, (15.0 * salary * years / 26.0 + 0.5).floor());
                assert_eq!(result.is_eligible, years >= 5.0);

                let capped = calculate_gratuity_with_cap(salary, years);
                assert_eq!(capped.uncapped_amount, result.gratuity_amount);
                assert_eq!(capped.result.gratuity_amount, result.gratuity_amount.min(2_000_000.0));
            }
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(calculate_gratuity_with_cap(500_000.0, 25.0)).unwrap();

        assert_eq!(json["gratuityAmount"], 2_000_000.0);
        assert_eq!(json["isCapped"], true);
        assert_eq!(json["uncappedAmount"], 7_211_538.0);
        assert_eq!(json["isEligible"], true);
    }

    #[test]
    fn test_completed_service_years() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(completed_service_years(d(2015, 4, 1), d(2025, 4, 1)), 10);
        // 4 years 7 months -> 5
        assert_eq!(completed_service_years(d(2020, 1, 1), d(2024, 8, 1)), 5);
        // 4 years 6 months exactly -> 4
        assert_eq!(completed_service_years(d(2020, 1, 1), d(2024, 7, 1)), 4);
        // 4 years 6 months and 10 days -> 5
        assert_eq!(completed_service_years(d(2020, 1, 1), d(2024, 7, 11)), 5);
        // 4 years 5 months 28 days -> 4
        assert_eq!(completed_service_years(d(2020, 1, 10), d(2024, 7, 8)), 4);
        assert_eq!(completed_service_years(d(2024, 1, 1), d(2020, 1, 1)), 0);
    }
}
