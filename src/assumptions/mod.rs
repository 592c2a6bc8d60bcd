//! Statutory and product assumptions used by the calculators

mod statutory;

pub use statutory::{GratuityRules, NpsRules, PpfRules};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// All rule sets in one place, loadable from a JSON file
///
/// Missing sections fall back to their statutory defaults, so a file only
/// needs to carry the values being overridden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub gratuity: GratuityRules,
    pub ppf: PpfRules,
    pub nps: NpsRules,
}

impl Assumptions {
    /// Load overrides from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let assumptions = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        log::debug!("loaded assumptions from {}", path.display());
        Ok(assumptions)
    }
}
