//! Strategy preset catalog — five named parameter bundles.
//!
//! Presets initialize or reset a strategy's configuration. The catalog is a
//! plain enum: every lookup builds a new `StrategyConfig`, so a returned value
//! can be mutated freely without affecting later lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{StrategyConfig, StrategyId};

/// Errors from the preset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown preset '{0}'. Valid: conservative, balanced, aggressive, phased, comprehensive")]
    PresetNotFound(String),
}

/// Named strategy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreset {
    Conservative,
    Balanced,
    Aggressive,
    Phased,
    Comprehensive,
}

impl StrategyPreset {
    pub const ALL: [StrategyPreset; 5] = [
        Self::Conservative,
        Self::Balanced,
        Self::Aggressive,
        Self::Phased,
        Self::Comprehensive,
    ];

    /// Catalog key used for lookup.
    pub fn key(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
            Self::Phased => "phased",
            Self::Comprehensive => "comprehensive",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
            Self::Phased => "Phased Rollout",
            Self::Comprehensive => "Comprehensive Transformation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Conservative => "Low investment, modest gains, short rollout",
            Self::Balanced => "Moderate investment and risk across all levers",
            Self::Aggressive => "Heavy investment for fast, high-risk returns",
            Self::Phased => "Staged rollout over eighteen months",
            Self::Comprehensive => "Enterprise-wide program with a two-year rollout",
        }
    }

    /// Build a fresh `StrategyConfig` with this preset's parameters.
    ///
    /// The id is `StrategyId(0)`; portfolios assign real ids on insertion.
    pub fn to_config(self) -> StrategyConfig {
        let (
            implementation_cost,
            annual_maintenance_cost,
            revenue_increase_percent,
            cost_reduction_percent,
            employee_productivity_percent,
            time_to_implement_months,
            risk_factor,
        ) = match self {
            Self::Conservative => (120_000.0, 24_000.0, 5.0, 8.0, 10.0, 6, 3.0),
            Self::Balanced => (250_000.0, 50_000.0, 10.0, 12.0, 15.0, 9, 5.0),
            Self::Aggressive => (500_000.0, 100_000.0, 20.0, 18.0, 25.0, 3, 8.0),
            Self::Phased => (200_000.0, 40_000.0, 8.0, 10.0, 12.0, 18, 4.0),
            Self::Comprehensive => (750_000.0, 150_000.0, 15.0, 20.0, 30.0, 24, 6.0),
        };

        StrategyConfig {
            id: StrategyId::default(),
            name: self.display_name().to_string(),
            implementation_cost,
            annual_maintenance_cost,
            revenue_increase_percent,
            cost_reduction_percent,
            employee_productivity_percent,
            time_to_implement_months,
            risk_factor,
            time_horizon_years: 5,
        }
    }
}

impl fmt::Display for StrategyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StrategyPreset {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::PresetNotFound(s.to_string()))
    }
}

/// Look up a preset by key and return an owned copy of its configuration.
pub fn lookup(key: &str) -> Result<StrategyConfig, CatalogError> {
    key.parse::<StrategyPreset>().map(StrategyPreset::to_config)
}
