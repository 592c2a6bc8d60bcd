//! Typed request/response boundary over the calculators
//!
//! Renderers, the CLI and the HTTP adapter all describe a calculation as a
//! [`CalculatorRequest`] (JSON or URL query parameters), and get back a
//! serializable [`CalculatorResponse`].
//!
//! The calculators accept anything and degrade to zero or NaN on bad input.
//! This layer does not: every request is validated before it is evaluated,
//! and invalid input comes back as a [`CalcError`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;

use crate::assumptions::Assumptions;
use crate::calculators::{self, *};
use crate::catalog::CalculatorId;
use crate::error::CalcError;
use crate::format::format_rupees;

/// Upper bound accepted for any annual rate (%)
const MAX_RATE_PCT: f64 = 50.0;

/// Upper bound accepted for any horizon (years)
const MAX_YEARS: u32 = 100;

// ============================================================================
// Request parameters
// ============================================================================

fn default_equity_return() -> f64 { DEFAULT_EQUITY_RETURN_PCT }
fn default_inflation() -> f64 { DEFAULT_INFLATION_PCT }
fn default_deposit_rate() -> f64 { DEFAULT_DEPOSIT_RATE_PCT }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipParams {
    pub monthly_investment: f64,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpSipParams {
    pub monthly_investment: f64,
    /// Yearly increase in the monthly amount (%)
    #[serde(default)]
    pub step_up: f64,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumParams {
    pub investment: f64,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualFundParams {
    pub purchase_nav: f64,
    pub current_nav: f64,
    #[serde(default)]
    pub years: f64,
    #[serde(default)]
    pub months: f64,
    #[serde(default)]
    pub units: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiParams {
    pub principal: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfParams {
    pub yearly_deposit: f64,
    /// Falls back to the notified rate in [`crate::PpfRules`]
    #[serde(default)]
    pub interest_rate: Option<f64>,
    /// Falls back to the 15-year lock-in
    #[serde(default)]
    pub years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdParams {
    pub principal: f64,
    #[serde(default = "default_deposit_rate")]
    pub interest_rate: f64,
    pub years: f64,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdParams {
    pub monthly_deposit: f64,
    #[serde(default = "default_deposit_rate")]
    pub interest_rate: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpParams {
    pub initial_corpus: f64,
    pub monthly_withdrawal: f64,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrParams {
    pub initial_value: f64,
    pub final_value: f64,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratuityParams {
    pub last_drawn_salary: f64,
    /// Either this or both service dates must be given
    #[serde(default)]
    pub years_of_service: Option<f64>,
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_leaving: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalParams {
    pub target_amount: f64,
    pub years: u32,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    #[serde(default = "default_inflation")]
    pub inflation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfDelayParams {
    pub monthly_investment: f64,
    pub years: u32,
    #[serde(default = "default_equity_return")]
    pub expected_return: f64,
    pub delay_months: u32,
}

/// One calculation, tagged by the calculator slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculatorRequest {
    Sip(SipParams),
    StepUpSip(StepUpSipParams),
    Lumpsum(LumpsumParams),
    MutualFundReturns(MutualFundParams),
    Emi(EmiParams),
    Ppf(PpfParams),
    Fd(FdParams),
    Rd(RdParams),
    Nps(NpsInput),
    Swp(SwpParams),
    Cagr(CagrParams),
    Gratuity(GratuityParams),
    GoalPlanner(GoalParams),
    CostOfDelay(CostOfDelayParams),
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculatorResponse {
    Sip {
        #[serde(flatten)]
        summary: SipResult,
        yearly: Vec<SipYearlyBreakdown>,
    },
    StepUpSip(StepUpSipResult),
    Lumpsum {
        #[serde(flatten)]
        summary: LumpsumResult,
        yearly: Vec<LumpsumYearlyBreakdown>,
    },
    MutualFundReturns(MfReturnsResult),
    Emi {
        #[serde(flatten)]
        summary: EmiResult,
        schedule: Vec<AmortizationYear>,
    },
    Ppf(PpfResult),
    Fd(FdResult),
    Rd(RdResult),
    Nps(NpsResult),
    Swp(SwpResult),
    Cagr(CagrResult),
    Gratuity(CappedGratuityResult),
    GoalPlanner(GoalPlanResult),
    CostOfDelay(CostOfDelayResult),
}

// ============================================================================
// Request handling
// ============================================================================

impl CalculatorRequest {
    pub fn id(&self) -> CalculatorId {
        match self {
            Self::Sip(_) => CalculatorId::Sip,
            Self::StepUpSip(_) => CalculatorId::StepUpSip,
            Self::Lumpsum(_) => CalculatorId::Lumpsum,
            Self::MutualFundReturns(_) => CalculatorId::MutualFundReturns,
            Self::Emi(_) => CalculatorId::Emi,
            Self::Ppf(_) => CalculatorId::Ppf,
            Self::Fd(_) => CalculatorId::Fd,
            Self::Rd(_) => CalculatorId::Rd,
            Self::Nps(_) => CalculatorId::Nps,
            Self::Swp(_) => CalculatorId::Swp,
            Self::Cagr(_) => CalculatorId::Cagr,
            Self::Gratuity(_) => CalculatorId::Gratuity,
            Self::GoalPlanner(_) => CalculatorId::GoalPlanner,
            Self::CostOfDelay(_) => CalculatorId::CostOfDelay,
        }
    }

    /// Build a request from a JSON object, routing on `calculator`
    pub fn from_json(value: Value) -> Result<Self, CalcError> {
        let value = normalize_calculator_tag(value)?;
        serde_json::from_value(value).map_err(|e| CalcError::InvalidRequest(e.to_string()))
    }

    /// Build a request from URL query parameters
    ///
    /// Values are typed by shape: integers, then decimals, then booleans,
    /// everything else stays a string (dates, compounding names). Empty
    /// values are dropped so the field's default applies.
    pub fn from_query<I, K, V>(calculator: &str, params: I) -> Result<Self, CalcError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let id: CalculatorId = calculator.parse()?;

        let mut map = Map::new();
        for (key, raw) in params {
            let key = key.as_ref();
            let raw = raw.as_ref().trim();
            if key == "calculator" || raw.is_empty() {
                continue;
            }
            map.insert(key.to_string(), query_value(raw));
        }
        map.insert("calculator".to_string(), Value::String(id.slug().to_string()));

        Self::from_json(Value::Object(map))
    }

    /// Reject input the calculators would silently degrade on
    pub fn validate(&self, assumptions: &Assumptions) -> Result<(), CalcError> {
        match self {
            Self::Sip(p) => {
                CalcError::positive("monthlyInvestment", p.monthly_investment)?;
                rate("expectedReturn", p.expected_return)?;
                years("years", p.years)?;
            }
            Self::StepUpSip(p) => {
                CalcError::positive("monthlyInvestment", p.monthly_investment)?;
                rate("stepUp", p.step_up)?;
                rate("expectedReturn", p.expected_return)?;
                years("years", p.years)?;
            }
            Self::Lumpsum(p) => {
                CalcError::positive("investment", p.investment)?;
                rate("expectedReturn", p.expected_return)?;
                CalcError::in_range("years", p.years as f64, 0.0, MAX_YEARS as f64)?;
            }
            Self::MutualFundReturns(p) => {
                CalcError::positive("purchaseNav", p.purchase_nav)?;
                CalcError::positive("currentNav", p.current_nav)?;
                CalcError::non_negative("years", p.years)?;
                CalcError::in_range("months", p.months, 0.0, 11.0)?;
                if !is_valid_holding_period(p.years, p.months) {
                    return Err(CalcError::Inconsistent(
                        "holding period must be at least one month".to_string(),
                    ));
                }
                if let Some(units) = p.units {
                    CalcError::positive("units", units)?;
                }
            }
            Self::Emi(p) => {
                CalcError::positive("principal", p.principal)?;
                rate("interestRate", p.interest_rate)?;
                CalcError::in_range("tenureMonths", p.tenure_months as f64, 1.0, (MAX_YEARS * 12) as f64)?;
            }
            Self::Ppf(p) => {
                let rules = &assumptions.ppf;
                CalcError::in_range(
                    "yearlyDeposit",
                    p.yearly_deposit,
                    rules.min_yearly_deposit,
                    rules.max_yearly_deposit,
                )?;
                if let Some(r) = p.interest_rate {
                    rate("interestRate", r)?;
                }
                if let Some(y) = p.years {
                    if !rules.is_valid_tenure(y) {
                        return Err(CalcError::Inconsistent(format!(
                            "PPF tenure must be {} years plus blocks of {}, got {}",
                            rules.min_tenure_years, rules.extension_block_years, y
                        )));
                    }
                }
            }
            Self::Fd(p) => {
                CalcError::positive("principal", p.principal)?;
                rate("interestRate", p.interest_rate)?;
                CalcError::in_range("years", p.years, 0.0, MAX_YEARS as f64)?;
                CalcError::positive("years", p.years)?;
            }
            Self::Rd(p) => {
                CalcError::positive("monthlyDeposit", p.monthly_deposit)?;
                rate("interestRate", p.interest_rate)?;
                CalcError::in_range("tenureMonths", p.tenure_months as f64, 1.0, (MAX_YEARS * 12) as f64)?;
            }
            Self::Nps(p) => {
                let rules = &assumptions.nps;
                CalcError::positive("monthlyContribution", p.monthly_contribution)?;
                CalcError::in_range(
                    "currentAge",
                    p.current_age as f64,
                    rules.min_entry_age as f64,
                    rules.max_exit_age as f64,
                )?;
                CalcError::in_range(
                    "retirementAge",
                    p.retirement_age as f64,
                    p.current_age as f64 + 1.0,
                    rules.max_exit_age as f64,
                )?;
                rate("expectedReturnPct", p.expected_return_pct)?;
                CalcError::in_range("annuityPct", p.annuity_pct, rules.min_annuity_pct, 100.0)?;
                rate("annuityRatePct", p.annuity_rate_pct)?;
                if let Some(inflation) = p.inflation_pct {
                    rate("inflationPct", inflation)?;
                }
            }
            Self::Swp(p) => {
                CalcError::positive("initialCorpus", p.initial_corpus)?;
                CalcError::positive("monthlyWithdrawal", p.monthly_withdrawal)?;
                rate("expectedReturn", p.expected_return)?;
                years("years", p.years)?;
            }
            Self::Cagr(p) => {
                CalcError::positive("initialValue", p.initial_value)?;
                CalcError::positive("finalValue", p.final_value)?;
                CalcError::positive("years", p.years)?;
            }
            Self::Gratuity(p) => {
                CalcError::positive("lastDrawnSalary", p.last_drawn_salary)?;
                match (p.years_of_service, p.date_of_joining, p.date_of_leaving) {
                    (Some(y), _, _) => {
                        CalcError::in_range("yearsOfService", y, 0.0, MAX_YEARS as f64)?;
                    }
                    (None, Some(joined), Some(left)) if left > joined => {}
                    (None, Some(_), Some(_)) => {
                        return Err(CalcError::Inconsistent(
                            "dateOfLeaving must be after dateOfJoining".to_string(),
                        ));
                    }
                    _ => {
                        return Err(CalcError::InvalidRequest(
                            "yearsOfService or both service dates are required".to_string(),
                        ));
                    }
                }
            }
            Self::GoalPlanner(p) => {
                CalcError::positive("targetAmount", p.target_amount)?;
                years("years", p.years)?;
                rate("expectedReturn", p.expected_return)?;
                rate("inflation", p.inflation)?;
            }
            Self::CostOfDelay(p) => {
                CalcError::positive("monthlyInvestment", p.monthly_investment)?;
                years("years", p.years)?;
                rate("expectedReturn", p.expected_return)?;
                if p.delay_months >= p.years * 12 {
                    return Err(CalcError::Inconsistent(format!(
                        "delayMonths ({}) must be shorter than the {}-year horizon",
                        p.delay_months, p.years
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate, then run the calculator
    pub fn evaluate(&self, assumptions: &Assumptions) -> Result<CalculatorResponse, CalcError> {
        self.validate(assumptions)?;
        log::debug!("evaluating {}", self.id());

        let response = match self {
            Self::Sip(p) => CalculatorResponse::Sip {
                summary: calculate_sip(p.monthly_investment, p.expected_return, p.years),
                yearly: calculate_sip_yearly_breakdown(p.monthly_investment, p.expected_return, p.years),
            },
            Self::StepUpSip(p) => CalculatorResponse::StepUpSip(calculate_step_up_sip(
                p.monthly_investment,
                p.step_up,
                p.expected_return,
                p.years,
            )),
            Self::Lumpsum(p) => CalculatorResponse::Lumpsum {
                summary: calculate_lumpsum(p.investment, p.expected_return, p.years as f64),
                yearly: calculate_lumpsum_yearly_breakdown(p.investment, p.expected_return, p.years),
            },
            Self::MutualFundReturns(p) => CalculatorResponse::MutualFundReturns(calculate_mf_returns(
                p.purchase_nav,
                p.current_nav,
                to_decimal_years(p.years, p.months),
                p.units,
            )),
            Self::Emi(p) => CalculatorResponse::Emi {
                summary: calculate_emi(p.principal, p.interest_rate, p.tenure_months),
                schedule: calculate_amortization_schedule(p.principal, p.interest_rate, p.tenure_months),
            },
            Self::Ppf(p) => CalculatorResponse::Ppf(calculate_ppf(
                p.yearly_deposit,
                p.interest_rate.unwrap_or(assumptions.ppf.default_rate_pct),
                p.years.unwrap_or(assumptions.ppf.min_tenure_years),
            )),
            Self::Fd(p) => CalculatorResponse::Fd(calculate_fd(p.principal, p.interest_rate, p.years, p.compounding)),
            Self::Rd(p) => CalculatorResponse::Rd(calculate_rd(p.monthly_deposit, p.interest_rate, p.tenure_months)),
            Self::Nps(p) => CalculatorResponse::Nps(calculate_nps(p)),
            Self::Swp(p) => CalculatorResponse::Swp(simulate_swp(
                p.initial_corpus,
                p.monthly_withdrawal,
                p.expected_return,
                p.years,
            )),
            Self::Cagr(p) => CalculatorResponse::Cagr(calculate_cagr(p.initial_value, p.final_value, p.years)),
            Self::Gratuity(p) => {
                let years = match (p.years_of_service, p.date_of_joining, p.date_of_leaving) {
                    (Some(y), _, _) => y,
                    (None, Some(joined), Some(left)) => calculators::completed_service_years(joined, left) as f64,
                    _ => 0.0,
                };
                CalculatorResponse::Gratuity(assumptions.gratuity.calculate_with_cap(p.last_drawn_salary, years))
            }
            Self::GoalPlanner(p) => {
                CalculatorResponse::GoalPlanner(plan_goal(p.target_amount, p.years, p.expected_return, p.inflation))
            }
            Self::CostOfDelay(p) => CalculatorResponse::CostOfDelay(calculate_cost_of_delay(
                p.monthly_investment,
                p.years,
                p.expected_return,
                p.delay_months,
            )),
        };

        Ok(response)
    }
}

fn rate(field: &'static str, value: f64) -> Result<f64, CalcError> {
    CalcError::in_range(field, value, 0.0, MAX_RATE_PCT)
}

fn years(field: &'static str, value: u32) -> Result<f64, CalcError> {
    CalcError::in_range(field, value as f64, 1.0, MAX_YEARS as f64)
}

/// Accept `"SIP"` or `"sip-calculator"` as the tag, not just the exact slug
fn normalize_calculator_tag(value: Value) -> Result<Value, CalcError> {
    let Value::Object(mut map) = value else {
        return Err(CalcError::InvalidRequest("request must be a JSON object".to_string()));
    };

    let tag = map
        .get("calculator")
        .and_then(Value::as_str)
        .ok_or_else(|| CalcError::InvalidRequest("missing 'calculator' field".to_string()))?;
    let id: CalculatorId = tag.parse()?;
    map.insert("calculator".to_string(), Value::String(id.slug().to_string()));

    Ok(Value::Object(map))
}

fn query_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

// ============================================================================
// Response rendering
// ============================================================================

impl CalculatorResponse {
    /// Headline figures, formatted for a results card
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let money = |label: &'static str, value: f64| (label, format_rupees(value));
        let pct = |label: &'static str, value: f64| (label, format!("{:.2}%", value));

        match self {
            Self::Sip { summary, .. } => vec![
                money("Invested amount", summary.invested_amount),
                money("Est. returns", summary.estimated_returns),
                money("Total value", summary.total_value),
            ],
            Self::StepUpSip(r) => vec![
                money("Invested amount", r.invested_amount),
                money("Est. returns", r.estimated_returns),
                money("Total value", r.total_value),
                money("Final monthly SIP", r.final_monthly_investment),
            ],
            Self::Lumpsum { summary, .. } => vec![
                money("Invested amount", summary.total_invested),
                money("Est. returns", summary.total_returns),
                money("Total value", summary.final_amount),
            ],
            Self::MutualFundReturns(r) => vec![
                pct("Absolute returns", r.absolute_returns),
                pct("CAGR", r.cagr),
                money("Invested amount", r.invested_amount),
                money("Current value", r.current_value),
                money("Total gain", r.total_gain),
            ],
            Self::Emi { summary, .. } => vec![
                money("Monthly EMI", summary.emi),
                money("Principal", summary.principal),
                money("Total interest", summary.total_interest),
                money("Total payment", summary.total_payment),
            ],
            Self::Ppf(r) => vec![
                money("Total invested", r.total_invested),
                money("Total interest", r.total_interest),
                money("Maturity value", r.maturity_value),
            ],
            Self::Fd(r) => vec![
                money("Principal", r.principal),
                money("Total interest", r.total_interest),
                money("Maturity amount", r.maturity_amount),
                pct("Effective annual rate", r.effective_annual_rate),
            ],
            Self::Rd(r) => vec![
                money("Total deposited", r.total_deposited),
                money("Total interest", r.total_interest),
                money("Maturity value", r.maturity_value),
            ],
            Self::Nps(r) => {
                let mut lines = vec![
                    money("Total invested", r.total_invested),
                    money("Total corpus", r.total_corpus),
                    money("Lump sum", r.lump_sum),
                    money("Annuity corpus", r.annuity_corpus),
                    money("Monthly pension", r.monthly_pension),
                ];
                if let Some(adjusted) = &r.inflation_adjusted {
                    lines.push(money("Lump sum (today's value)", adjusted.lump_sum));
                    lines.push(money("Monthly pension (today's value)", adjusted.monthly_pension));
                }
                lines
            }
            Self::Swp(r) => {
                let status = match r.outcome {
                    SwpOutcome::Survives { years } => format!("Lasts the full {} years", years),
                    SwpOutcome::Depleted { month } => {
                        format!("Depleted in month {} (year {})", month, month.div_ceil(12))
                    }
                };
                vec![
                    money("Total withdrawn", r.total_withdrawn),
                    money("Total returns", r.total_returns),
                    money("Final value", r.final_value),
                    ("Outcome", status),
                ]
            }
            Self::Cagr(r) => vec![
                pct("CAGR", r.cagr),
                pct("Absolute return", r.absolute_return),
                money("Gain", r.gain),
            ],
            Self::Gratuity(r) => {
                let mut lines = vec![
                    money("Gratuity", r.result.gratuity_amount),
                    ("Eligible", (if r.result.is_eligible { "Yes" } else { "No" }).to_string()),
                ];
                if r.is_capped {
                    lines.push(money("Before statutory cap", r.uncapped_amount));
                }
                lines
            }
            Self::GoalPlanner(r) => vec![
                money("Goal cost today", r.target_today),
                money("Goal cost at target", r.future_cost),
                money("Monthly SIP needed", r.monthly_sip),
                money("Or lumpsum today", r.lumpsum_today),
            ],
            Self::CostOfDelay(r) => vec![
                money("Corpus if started now", r.corpus_if_started_now),
                money("Corpus if delayed", r.corpus_if_delayed),
                money("Cost of delay", r.cost_of_delay),
                pct("Loss", r.loss_pct),
                money("SIP needed to catch up", r.required_sip_to_catch_up),
            ],
        }
    }

    /// Write the breakdown table as CSV; returns the number of rows written
    ///
    /// Calculators without a breakdown write nothing.
    pub fn write_breakdown_csv<W: Write>(&self, writer: W) -> Result<usize, csv::Error> {
        let mut table = csv::Writer::from_writer(writer);

        let rows = match self {
            Self::Sip { yearly, .. } => serialize_rows(&mut table, yearly)?,
            Self::StepUpSip(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::Lumpsum { yearly, .. } => serialize_rows(&mut table, yearly)?,
            Self::Emi { schedule, .. } => serialize_rows(&mut table, schedule)?,
            Self::Ppf(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::Fd(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::Rd(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::Nps(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::Swp(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::GoalPlanner(r) => serialize_rows(&mut table, &r.yearly)?,
            Self::MutualFundReturns(_) | Self::Cagr(_) | Self::Gratuity(_) | Self::CostOfDelay(_) => 0,
        };

        table.flush()?;
        Ok(rows)
    }
}

fn serialize_rows<W: Write, T: Serialize>(table: &mut csv::Writer<W>, rows: &[T]) -> Result<usize, csv::Error> {
    for row in rows {
        table.serialize(row)?;
    }
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let request = CalculatorRequest::from_json(json!({
            "calculator": "sip",
            "monthlyInvestment": 10000,
            "years": 10
        }))
        .unwrap();

        assert_eq!(
            request,
            CalculatorRequest::Sip(SipParams {
                monthly_investment: 10_000.0,
                expected_return: 12.0,
                years: 10,
            })
        );
    }

    #[test]
    fn test_tag_aliases() {
        let request = CalculatorRequest::from_json(json!({
            "calculator": "Goal_Planner",
            "targetAmount": 2000000,
            "years": 10
        }))
        .unwrap();

        assert_eq!(request.id(), CalculatorId::GoalPlanner);
    }

    #[test]
    fn test_from_query() {
        let request = CalculatorRequest::from_query(
            "gratuity",
            [("lastDrawnSalary", "500000"), ("yearsOfService", "25"), ("utm_source", "")],
        )
        .unwrap();

        let response = request.evaluate(&Assumptions::default()).unwrap();
        match response {
            CalculatorResponse::Gratuity(r) => {
                assert_eq!(r.result.gratuity_amount, 2_000_000.0);
                assert!(r.is_capped);
                assert_eq!(r.uncapped_amount, 7_211_538.0);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_query_typing() {
        assert_eq!(query_value("12"), json!(12));
        assert_eq!(query_value("7.1"), json!(7.1));
        assert_eq!(query_value("true"), json!(true));
        assert_eq!(query_value("quarterly"), json!("quarterly"));
        assert_eq!(query_value("2015-04-01"), json!("2015-04-01"));
        assert_eq!(query_value("NaN"), json!("NaN"));
    }

    #[test]
    fn test_unknown_calculator() {
        let err = CalculatorRequest::from_query("crypto", Vec::<(String, String)>::new()).unwrap_err();
        assert_eq!(err, CalcError::UnknownCalculator("crypto".to_string()));

        let err = CalculatorRequest::from_json(json!({ "years": 3 })).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRequest(_)));
    }

    #[test]
    fn test_missing_field() {
        let err = CalculatorRequest::from_query("emi", [("principal", "100000")]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRequest(_)));
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let assumptions = Assumptions::default();

        let negative_salary = CalculatorRequest::Gratuity(GratuityParams {
            last_drawn_salary: -50_000.0,
            years_of_service: Some(10.0),
            date_of_joining: None,
            date_of_leaving: None,
        });
        assert!(matches!(
            negative_salary.evaluate(&assumptions),
            Err(CalcError::NotPositive { field: "lastDrawnSalary", .. })
        ));

        let zero_nav = CalculatorRequest::MutualFundReturns(MutualFundParams {
            purchase_nav: 0.0,
            current_nav: 150.0,
            years: 3.0,
            months: 0.0,
            units: None,
        });
        assert!(zero_nav.evaluate(&assumptions).is_err());

        let empty_period = CalculatorRequest::MutualFundReturns(MutualFundParams {
            purchase_nav: 100.0,
            current_nav: 150.0,
            years: 0.0,
            months: 0.0,
            units: None,
        });
        assert!(matches!(empty_period.evaluate(&assumptions), Err(CalcError::Inconsistent(_))));

        let over_limit = CalculatorRequest::Ppf(PpfParams {
            yearly_deposit: 200_000.0,
            interest_rate: None,
            years: None,
        });
        assert!(matches!(over_limit.evaluate(&assumptions), Err(CalcError::OutOfRange { .. })));

        let bad_tenure = CalculatorRequest::Ppf(PpfParams {
            yearly_deposit: 100_000.0,
            interest_rate: None,
            years: Some(18),
        });
        assert!(bad_tenure.evaluate(&assumptions).is_err());

        let low_annuity = CalculatorRequest::Nps(NpsInput { annuity_pct: 20.0, ..NpsInput::default() });
        assert!(low_annuity.evaluate(&assumptions).is_err());

        let long_delay = CalculatorRequest::CostOfDelay(CostOfDelayParams {
            monthly_investment: 5_000.0,
            years: 2,
            expected_return: 12.0,
            delay_months: 24,
        });
        assert!(long_delay.evaluate(&assumptions).is_err());
    }

    #[test]
    fn test_ppf_defaults_from_assumptions() {
        let request = CalculatorRequest::from_query("ppf", [("yearlyDeposit", "150000")]).unwrap();

        match request.evaluate(&Assumptions::default()).unwrap() {
            CalculatorResponse::Ppf(r) => {
                assert_eq!(r.yearly.len(), 15);
                assert_eq!(r.maturity_value, 4_068_209.0);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_gratuity_from_dates() {
        let request = CalculatorRequest::from_query(
            "gratuity",
            [
                ("lastDrawnSalary", "50000"),
                ("dateOfJoining", "2015-04-01"),
                ("dateOfLeaving", "2025-04-01"),
            ],
        )
        .unwrap();

        match request.evaluate(&Assumptions::default()).unwrap() {
            CalculatorResponse::Gratuity(r) => {
                assert_eq!(r.result.years_of_service, 10.0);
                assert_eq!(r.result.gratuity_amount, 288_462.0);
            }
            other => panic!("unexpected response {:?}", other),
        }

        let missing = CalculatorRequest::from_query("gratuity", [("lastDrawnSalary", "50000")]).unwrap();
        assert!(missing.evaluate(&Assumptions::default()).is_err());
    }

    #[test]
    fn test_fd_compounding_from_query() {
        let request = CalculatorRequest::from_query(
            "fd",
            [("principal", "100000"), ("interestRate", "7"), ("years", "5"), ("compounding", "quarterly")],
        )
        .unwrap();

        match request.evaluate(&Assumptions::default()).unwrap() {
            CalculatorResponse::Fd(r) => assert_eq!(r.maturity_amount, 141_478.0),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_fd_compounding_aliases() {
        let base = [("principal", "100000"), ("interestRate", "7"), ("years", "5")];
        let compounding = |raw: &'static str| {
            let mut pairs = base.to_vec();
            pairs.push(("compounding", raw));
            match CalculatorRequest::from_query("fd", pairs).unwrap() {
                CalculatorRequest::Fd(p) => p.compounding,
                other => panic!("unexpected request {:?}", other),
            }
        };

        assert_eq!(compounding("12"), CompoundingFrequency::Monthly);
        assert_eq!(compounding("Quarterly"), CompoundingFrequency::Quarterly);
        assert_eq!(compounding("annually"), CompoundingFrequency::Yearly);
        assert_eq!(compounding("halfyearly"), CompoundingFrequency::HalfYearly);

        let mut pairs = base.to_vec();
        pairs.push(("compounding", "3"));
        assert!(matches!(
            CalculatorRequest::from_query("fd", pairs),
            Err(CalcError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response_json_shape() {
        let request = CalculatorRequest::from_query(
            "lumpsum",
            [("investment", "100000"), ("expectedReturn", "12"), ("years", "10")],
        )
        .unwrap();
        let json = serde_json::to_value(request.evaluate(&Assumptions::default()).unwrap()).unwrap();

        assert_eq!(json["finalAmount"], 310_585.0);
        assert_eq!(json["totalInvested"], 100_000.0);
        assert_eq!(json["yearly"].as_array().unwrap().len(), 10);
        assert_eq!(json["yearly"][0]["totalValue"], 112_000.0);
    }

    #[test]
    fn test_summary_lines() {
        let request = CalculatorRequest::from_query(
            "gratuity",
            [("lastDrawnSalary", "500000"), ("yearsOfService", "25")],
        )
        .unwrap();
        let summary = request.evaluate(&Assumptions::default()).unwrap().summary();

        assert_eq!(summary[0], ("Gratuity", "₹20.00 L".to_string()));
        assert_eq!(summary[1], ("Eligible", "Yes".to_string()));
        assert_eq!(summary[2], ("Before statutory cap", "₹72.12 L".to_string()));
    }

    #[test]
    fn test_breakdown_csv() {
        let request = CalculatorRequest::from_query(
            "emi",
            [("principal", "1000000"), ("interestRate", "10"), ("tenureMonths", "60")],
        )
        .unwrap();
        let response = request.evaluate(&Assumptions::default()).unwrap();

        let mut out = Vec::new();
        let rows = response.write_breakdown_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 5);
        assert!(text.starts_with("year,principalPaid,interestPaid,closingBalance\n"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_every_calculator_round_trips_through_json() {
        let requests = vec![
            json!({ "calculator": "sip", "monthlyInvestment": 5000, "years": 5 }),
            json!({ "calculator": "step-up-sip", "monthlyInvestment": 5000, "stepUp": 10, "years": 5 }),
            json!({ "calculator": "lumpsum", "investment": 100000, "years": 5 }),
            json!({ "calculator": "mutual-fund-returns", "purchaseNav": 100, "currentNav": 150, "years": 3 }),
            json!({ "calculator": "emi", "principal": 500000, "interestRate": 9, "tenureMonths": 36 }),
            json!({ "calculator": "ppf", "yearlyDeposit": 50000 }),
            json!({ "calculator": "fd", "principal": 100000, "years": 3 }),
            json!({ "calculator": "rd", "monthlyDeposit": 5000, "tenureMonths": 24 }),
            json!({ "calculator": "nps", "monthlyContribution": 5000, "currentAge": 30 }),
            json!({ "calculator": "swp", "initialCorpus": 1000000, "monthlyWithdrawal": 8000, "years": 10 }),
            json!({ "calculator": "cagr", "initialValue": 100, "finalValue": 200, "years": 5 }),
            json!({ "calculator": "gratuity", "lastDrawnSalary": 40000, "yearsOfService": 7 }),
            json!({ "calculator": "goal-planner", "targetAmount": 1000000, "years": 8 }),
            json!({ "calculator": "cost-of-delay", "monthlyInvestment": 5000, "years": 10, "delayMonths": 6 }),
        ];
        assert_eq!(requests.len(), CalculatorId::all().count());

        for value in requests {
            let request = CalculatorRequest::from_json(value.clone()).unwrap();
            let response = request.evaluate(&Assumptions::default()).unwrap();
            assert!(!response.summary().is_empty(), "{}", value);

            let reparsed: CalculatorRequest =
                serde_json::from_value(serde_json::to_value(&request).unwrap()).unwrap();
            assert_eq!(reparsed, request);
        }
    }
}
