//! Input fingerprinting — deterministic identification of projection inputs.
//!
//! - `StrategyConfig::params_hash()`: the numeric parameters of one strategy
//!   (id and display name excluded).
//! - `InputFingerprint`: every strategy's parameters plus the shared context.
//!
//! Two reports with the same fingerprint were computed from identical inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{GlobalContext, StrategyConfig};

/// BLAKE3 hex digest of canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFingerprint(pub String);

impl InputFingerprint {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// Fingerprint a comparison: strategy parameters in order, then context.
    pub fn of(strategies: &[StrategyConfig], context: &GlobalContext) -> Self {
        let canonical = serde_json::json!({
            "context": context,
            "strategies": strategies.iter().map(ParamsView::from).collect::<Vec<_>>(),
        });
        Self::from_bytes(canonical.to_string().as_bytes())
    }

    /// First 12 characters, for display.
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(12)
            .map_or(&self.0[..], |(i, _)| &self.0[..i])
    }
}

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The hashed subset of a `StrategyConfig`.
#[derive(Serialize)]
struct ParamsView {
    implementation_cost: f64,
    annual_maintenance_cost: f64,
    revenue_increase_percent: f64,
    cost_reduction_percent: f64,
    employee_productivity_percent: f64,
    time_to_implement_months: u32,
    risk_factor: f64,
    time_horizon_years: u32,
}

impl From<&StrategyConfig> for ParamsView {
    fn from(s: &StrategyConfig) -> Self {
        Self {
            implementation_cost: s.implementation_cost,
            annual_maintenance_cost: s.annual_maintenance_cost,
            revenue_increase_percent: s.revenue_increase_percent,
            cost_reduction_percent: s.cost_reduction_percent,
            employee_productivity_percent: s.employee_productivity_percent,
            time_to_implement_months: s.time_to_implement_months,
            risk_factor: s.risk_factor,
            time_horizon_years: s.time_horizon_years,
        }
    }
}

impl StrategyConfig {
    /// Hash of the numeric parameters only.
    ///
    /// Two strategies built from the same preset hash identically even after
    /// the portfolio gives them different ids and names.
    pub fn params_hash(&self) -> InputFingerprint {
        let json =
            serde_json::to_string(&ParamsView::from(self)).expect("StrategyConfig must serialize");
        InputFingerprint::from_bytes(json.as_bytes())
    }
}
