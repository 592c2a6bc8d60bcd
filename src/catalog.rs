//! Calculator catalog
//!
//! Stable identifiers for every calculator, as used in article front matter
//! (`calculators: [sip, emi]`), page URLs and request routing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorId {
    Sip,
    StepUpSip,
    Lumpsum,
    MutualFundReturns,
    Emi,
    Ppf,
    Fd,
    Rd,
    Nps,
    Swp,
    Cagr,
    Gratuity,
    GoalPlanner,
    CostOfDelay,
}

/// Display metadata for one calculator page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorInfo {
    pub id: CalculatorId,
    pub title: &'static str,
    pub description: &'static str,
}

impl CalculatorInfo {
    pub fn path(&self) -> String {
        format!("/calculators/{}", self.id.slug())
    }
}

const CATALOG: &[CalculatorInfo] = &[
    CalculatorInfo {
        id: CalculatorId::Sip,
        title: "SIP Calculator",
        description: "Future value of a monthly SIP",
    },
    CalculatorInfo {
        id: CalculatorId::StepUpSip,
        title: "Step-up SIP Calculator",
        description: "SIP with a yearly increase in the monthly amount",
    },
    CalculatorInfo {
        id: CalculatorId::Lumpsum,
        title: "Lumpsum Calculator",
        description: "Growth of a one-time investment",
    },
    CalculatorInfo {
        id: CalculatorId::MutualFundReturns,
        title: "Mutual Fund Returns Calculator",
        description: "Absolute return and CAGR from purchase and current NAV",
    },
    CalculatorInfo {
        id: CalculatorId::Emi,
        title: "EMI Calculator",
        description: "Monthly instalment and amortization for a loan",
    },
    CalculatorInfo {
        id: CalculatorId::Ppf,
        title: "PPF Calculator",
        description: "Public Provident Fund maturity value",
    },
    CalculatorInfo {
        id: CalculatorId::Fd,
        title: "FD Calculator",
        description: "Fixed deposit maturity with periodic compounding",
    },
    CalculatorInfo {
        id: CalculatorId::Rd,
        title: "RD Calculator",
        description: "Recurring deposit maturity value",
    },
    CalculatorInfo {
        id: CalculatorId::Nps,
        title: "NPS Calculator",
        description: "Retirement corpus, lump sum and pension from NPS",
    },
    CalculatorInfo {
        id: CalculatorId::Swp,
        title: "SWP Calculator",
        description: "How long a corpus lasts with monthly withdrawals",
    },
    CalculatorInfo {
        id: CalculatorId::Cagr,
        title: "CAGR Calculator",
        description: "Compound annual growth rate between two values",
    },
    CalculatorInfo {
        id: CalculatorId::Gratuity,
        title: "Gratuity Calculator",
        description: "Gratuity payable under the Payment of Gratuity Act",
    },
    CalculatorInfo {
        id: CalculatorId::GoalPlanner,
        title: "Goal Planning Calculator",
        description: "Monthly SIP or lumpsum needed for a future goal",
    },
    CalculatorInfo {
        id: CalculatorId::CostOfDelay,
        title: "Cost of Delay Calculator",
        description: "What postponing a SIP costs at the finish line",
    },
];

impl CalculatorId {
    pub fn all() -> impl Iterator<Item = CalculatorId> {
        CATALOG.iter().map(|info| info.id)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::StepUpSip => "step-up-sip",
            Self::Lumpsum => "lumpsum",
            Self::MutualFundReturns => "mutual-fund-returns",
            Self::Emi => "emi",
            Self::Ppf => "ppf",
            Self::Fd => "fd",
            Self::Rd => "rd",
            Self::Nps => "nps",
            Self::Swp => "swp",
            Self::Cagr => "cagr",
            Self::Gratuity => "gratuity",
            Self::GoalPlanner => "goal-planner",
            Self::CostOfDelay => "cost-of-delay",
        }
    }

    pub fn info(self) -> &'static CalculatorInfo {
        CATALOG
            .iter()
            .find(|info| info.id == self)
            .unwrap_or(&CATALOG[0])
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CalculatorId {
    type Err = CalcError;

    /// Accepts the slug, optionally with a `-calculator` suffix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let normalized = normalized.strip_suffix("-calculator").unwrap_or(normalized.as_str());

        Self::all()
            .find(|id| id.slug() == normalized)
            .ok_or_else(|| CalcError::UnknownCalculator(s.to_string()))
    }
}

/// Resolve a front-matter `calculators:` list to catalog entries
///
/// Unknown identifiers are skipped with a warning so one typo in an article
/// does not break the page; duplicates are dropped.
pub fn resolve_related<S: AsRef<str>>(identifiers: &[S]) -> Vec<&'static CalculatorInfo> {
    let mut related: Vec<&'static CalculatorInfo> = Vec::new();

    for identifier in identifiers {
        match identifier.as_ref().parse::<CalculatorId>() {
            Ok(id) if !related.iter().any(|info| info.id == id) => related.push(id.info()),
            Ok(_) => {}
            Err(e) => log::warn!("skipping related calculator: {}", e),
        }
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_id() {
        assert_eq!(CalculatorId::all().count(), 14);
        for id in CalculatorId::all() {
            assert_eq!(id.info().id, id);
            assert_eq!(id.slug().parse::<CalculatorId>(), Ok(id));
        }
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("SIP".parse::<CalculatorId>(), Ok(CalculatorId::Sip));
        assert_eq!("goal_planner".parse::<CalculatorId>(), Ok(CalculatorId::GoalPlanner));
        assert_eq!("emi-calculator".parse::<CalculatorId>(), Ok(CalculatorId::Emi));
        assert_eq!(
            "bitcoin".parse::<CalculatorId>(),
            Err(CalcError::UnknownCalculator("bitcoin".to_string()))
        );
    }

    #[test]
    fn test_serde_matches_slug() {
        for id in CalculatorId::all() {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.slug()));
        }
    }

    #[test]
    fn test_resolve_related() {
        let related = resolve_related(&["sip", "unknown", "ppf", "sip"]);

        assert_eq!(related.len(), 2);
        assert_eq!(related[0].id, CalculatorId::Sip);
        assert_eq!(related[1].path(), "/calculators/ppf");
    }
}
