//! Portfolio configuration — TOML description of a strategy comparison.
//!
//! ```toml
//! [context]
//! annual_revenue = 10000000.0
//! employee_count = 100
//! discount_rate_percent = 5.0
//!
//! [[strategy]]
//! preset = "conservative"
//!
//! [[strategy]]
//! preset = "aggressive"
//! name = "Fast track"
//! [strategy.overrides]
//! implementation_cost = 400000.0
//! ```
//!
//! Each entry starts from its preset; `overrides` replace individual fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use roilab_core::{CatalogError, GlobalContext, StrategyConfig};

use crate::portfolio::{Portfolio, PortfolioError};

/// Errors from loading a portfolio configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse portfolio TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("portfolio config lists no strategies")]
    Empty,
    #[error("portfolio config lists {count} strategies (max {max})")]
    TooMany { count: usize, max: usize },
    #[error("strategy #{index}: {source}")]
    Preset {
        index: usize,
        #[source]
        source: CatalogError,
    },
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

/// Field-level replacements applied on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyOverrides {
    pub implementation_cost: Option<f64>,
    pub annual_maintenance_cost: Option<f64>,
    pub revenue_increase_percent: Option<f64>,
    pub cost_reduction_percent: Option<f64>,
    pub employee_productivity_percent: Option<f64>,
    pub time_to_implement_months: Option<u32>,
    pub risk_factor: Option<f64>,
    pub time_horizon_years: Option<u32>,
}

impl StrategyOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every present field into `config`.
    pub fn apply(&self, config: &mut StrategyConfig) {
        if let Some(v) = self.implementation_cost {
            config.implementation_cost = v;
        }
        if let Some(v) = self.annual_maintenance_cost {
            config.annual_maintenance_cost = v;
        }
        if let Some(v) = self.revenue_increase_percent {
            config.revenue_increase_percent = v;
        }
        if let Some(v) = self.cost_reduction_percent {
            config.cost_reduction_percent = v;
        }
        if let Some(v) = self.employee_productivity_percent {
            config.employee_productivity_percent = v;
        }
        if let Some(v) = self.time_to_implement_months {
            config.time_to_implement_months = v;
        }
        if let Some(v) = self.risk_factor {
            config.risk_factor = v;
        }
        if let Some(v) = self.time_horizon_years {
            config.time_horizon_years = v;
        }
    }
}

/// One `[[strategy]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyEntry {
    pub preset: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overrides: StrategyOverrides,
}

/// A complete comparison: shared context plus strategy entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub context: GlobalContext,
    #[serde(rename = "strategy", default)]
    pub strategies: Vec<StrategyEntry>,
}

impl PortfolioConfig {
    /// Load a portfolio configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and structurally validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::Empty);
        }
        if self.strategies.len() > Portfolio::CAPACITY {
            return Err(ConfigError::TooMany {
                count: self.strategies.len(),
                max: Portfolio::CAPACITY,
            });
        }
        for (i, entry) in self.strategies.iter().enumerate() {
            roilab_core::lookup(&entry.preset).map_err(|source| ConfigError::Preset {
                index: i + 1,
                source,
            })?;
        }
        Ok(())
    }

    /// Build a portfolio: presets first, then names and overrides, in file order.
    pub fn into_portfolio(self) -> Result<Portfolio, ConfigError> {
        let mut entries = self.strategies.into_iter();
        let first = entries.next().ok_or(ConfigError::Empty)?;

        let mut portfolio = Portfolio::new(self.context, &first.preset)?;
        let first_id = portfolio.strategies()[0].id;
        customize(&mut portfolio, first_id, first)?;

        for entry in entries {
            let id = portfolio.add_strategy(&entry.preset)?;
            customize(&mut portfolio, id, entry)?;
        }
        Ok(portfolio)
    }
}

fn customize(
    portfolio: &mut Portfolio,
    id: roilab_core::StrategyId,
    entry: StrategyEntry,
) -> Result<(), PortfolioError> {
    if let Some(name) = entry.name {
        portfolio.rename_strategy(id, name)?;
    }
    if !entry.overrides.is_empty() {
        portfolio.edit_strategy(id, |s| entry.overrides.apply(s))?;
    }
    Ok(())
}
