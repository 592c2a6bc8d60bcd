//! Calculator implementations
//!
//! Each calculator is an independent pure function over plain numbers.
//! Closed-form calculators evaluate every breakdown row at its own horizon;
//! SWP, step-up SIP, EMI amortization and PPF carry a running balance.

pub mod cagr;
pub mod cost_of_delay;
pub mod emi;
pub mod fd;
pub mod goal;
pub mod gratuity;
pub mod lumpsum;
pub mod mutual_fund;
pub mod nps;
pub mod ppf;
pub mod rd;
pub mod sip;
pub mod swp;

pub use cagr::{calculate_cagr, CagrResult};
pub use cost_of_delay::{calculate_cost_of_delay, CostOfDelayResult};
pub use emi::{calculate_amortization_schedule, calculate_emi, AmortizationYear, EmiResult};
pub use fd::{calculate_fd, CompoundingFrequency, FdResult, FdYear};
pub use goal::{plan_goal, GoalPlanResult, GoalYear};
pub use gratuity::{
    calculate_gratuity, calculate_gratuity_with_cap, completed_service_years, CappedGratuityResult,
    GratuityResult,
};
pub use lumpsum::{calculate_lumpsum, calculate_lumpsum_yearly_breakdown, LumpsumResult, LumpsumYearlyBreakdown};
pub use mutual_fund::{calculate_mf_returns, is_valid_holding_period, to_decimal_years, MfReturnsResult};
pub use nps::{calculate_nps, NpsInflationAdjusted, NpsInput, NpsResult, NpsYear};
pub use ppf::{calculate_ppf, PpfResult, PpfYear};
pub use rd::{calculate_rd, RdResult, RdYear};
pub use sip::{
    calculate_sip, calculate_sip_yearly_breakdown, calculate_step_up_sip, required_monthly_sip,
    sip_future_value, SipResult, SipYearlyBreakdown, StepUpSipResult, StepUpSipYear,
};
pub use swp::{simulate_swp, SwpOutcome, SwpResult, SwpYear};

// ============================================================================
// Default slider positions
// ============================================================================
// Values the calculator pages open with; also used when a request leaves a
// rate out.

/// Default expected return for equity SIP / lumpsum / SWP (annual %)
pub const DEFAULT_EQUITY_RETURN_PCT: f64 = 12.0;

/// Default inflation for goal planning (annual %)
pub const DEFAULT_INFLATION_PCT: f64 = 6.0;

/// Default fixed deposit / RD rate (annual %)
pub const DEFAULT_DEPOSIT_RATE_PCT: f64 = 7.0;

/// Whole years as a month count, saturating at `u32::MAX`
pub(crate) fn months_in(years: u32) -> u32 {
    years.saturating_mul(12)
}
