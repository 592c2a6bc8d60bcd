//! Statutory limits: gratuity ceiling, PPF deposit band, NPS annuity share

use serde::{Deserialize, Serialize};

/// Payment of Gratuity Act terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GratuityRules {
    /// Days of wages paid per completed year of service
    pub wage_days: f64,

    /// Working days in a month used to derive the daily wage
    pub working_days_per_month: f64,

    /// Minimum continuous service for eligibility (years)
    pub eligibility_years: f64,

    /// Statutory ceiling on the amount paid
    pub cap: f64,
}

impl Default for GratuityRules {
    fn default() -> Self {
        Self {
            wage_days: 15.0,
            working_days_per_month: 26.0,
            eligibility_years: 5.0,
            cap: 2_000_000.0, // Rs 20 lakh
        }
    }
}

impl GratuityRules {
    /// Unrounded gratuity: wage_days/working_days x salary x years
    pub fn raw_amount(&self, last_drawn_salary: f64, years_of_service: f64) -> f64 {
        self.wage_days * last_drawn_salary * years_of_service / self.working_days_per_month
    }

    pub fn is_eligible(&self, years_of_service: f64) -> bool {
        years_of_service >= self.eligibility_years
    }
}

/// Public Provident Fund scheme terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpfRules {
    /// Minimum deposit per financial year
    pub min_yearly_deposit: f64,

    /// Maximum deposit per financial year
    pub max_yearly_deposit: f64,

    /// Current notified rate (annual %)
    pub default_rate_pct: f64,

    /// Lock-in before maturity
    pub min_tenure_years: u32,

    /// Extensions after maturity are granted in blocks of this many years
    pub extension_block_years: u32,
}

impl Default for PpfRules {
    fn default() -> Self {
        Self {
            min_yearly_deposit: 500.0,
            max_yearly_deposit: 150_000.0,
            default_rate_pct: 7.1,
            min_tenure_years: 15,
            extension_block_years: 5,
        }
    }
}

impl PpfRules {
    /// A tenure is valid at maturity or any whole extension block after it
    pub fn is_valid_tenure(&self, years: u32) -> bool {
        years >= self.min_tenure_years
            && (years - self.min_tenure_years) % self.extension_block_years.max(1) == 0
    }
}

/// National Pension System exit terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpsRules {
    /// Minimum share of the corpus that must buy an annuity (%)
    pub min_annuity_pct: f64,

    /// Earliest age for joining
    pub min_entry_age: u32,

    /// Latest age the account can be kept open to
    pub max_exit_age: u32,
}

impl Default for NpsRules {
    fn default() -> Self {
        Self {
            min_annuity_pct: 40.0,
            min_entry_age: 18,
            max_exit_age: 75,
        }
    }
}
