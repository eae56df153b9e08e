//! Domain types — the plain data shapes shared by the engine and its consumers.
//!
//! Inputs (`GlobalContext`, `StrategyConfig`) are caller-owned value objects.
//! Outputs (`YearlyProjection`, `StrategyResult`) are recomputed on every
//! projection and carry no identity of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a strategy within a portfolio.
///
/// Presets come out of the catalog with `StrategyId(0)`; the portfolio assigns
/// fresh ids on insertion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct StrategyId(pub u32);

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Business parameters shared by every strategy in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalContext {
    /// Annual revenue in currency units. Must be positive.
    pub annual_revenue: f64,
    pub employee_count: u32,
    /// Discount rate used for the discounted cash flow series, in percent.
    pub discount_rate_percent: f64,
}

impl GlobalContext {
    pub fn new(annual_revenue: f64, employee_count: u32, discount_rate_percent: f64) -> Self {
        Self {
            annual_revenue,
            employee_count,
            discount_rate_percent,
        }
    }
}

impl Default for GlobalContext {
    /// A mid-sized business: $10M revenue, 100 employees, 5% discount rate.
    fn default() -> Self {
        Self {
            annual_revenue: 10_000_000.0,
            employee_count: 100,
            discount_rate_percent: 5.0,
        }
    }
}

/// One fully parameterized business-transformation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub id: StrategyId,
    pub name: String,
    /// One-time cost, charged in year 1.
    pub implementation_cost: f64,
    /// Recurring cost, charged every year of the horizon.
    pub annual_maintenance_cost: f64,
    pub revenue_increase_percent: f64,
    pub cost_reduction_percent: f64,
    pub employee_productivity_percent: f64,
    pub time_to_implement_months: u32,
    /// Risk on a 0–10 scale; scales down the risk-adjusted ROI.
    pub risk_factor: f64,
    /// Number of projected years. Must be at least 1.
    pub time_horizon_years: u32,
}

/// Cash-flow projection for a single year of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// 1-based year index.
    pub year: u32,
    /// Benefit scaling applied this year (0.0–1.0).
    pub ramp_fraction: f64,
    pub investment_outflow: f64,
    pub revenue_gain: f64,
    /// Operating cost savings plus productivity gains.
    pub cost_savings_gain: f64,
    pub net_cash_flow: f64,
    pub cumulative_cash_flow: f64,
    pub discounted_cash_flow: f64,
}

impl YearlyProjection {
    /// Revenue gain plus cost savings for the year.
    pub fn total_gain(&self) -> f64 {
        self.revenue_gain + self.cost_savings_gain
    }
}

/// Complete projection of one strategy under one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: StrategyConfig,
    pub projections: Vec<YearlyProjection>,
    pub total_investment: f64,
    pub total_revenue: f64,
    pub total_cost_savings: f64,
    pub total_benefits: f64,
    pub net_benefit: f64,
    pub roi_percent: f64,
    pub risk_adjusted_roi_percent: f64,
    /// Linear stand-in for IRR, not a root-finding result.
    pub irr_approx_percent: f64,
    /// Sum of discounted yearly cash flows less the up-front implementation cost.
    pub npv: f64,
    pub payback_period_months: u32,
}

impl StrategyResult {
    pub fn id(&self) -> StrategyId {
        self.strategy.id
    }

    pub fn name(&self) -> &str {
        &self.strategy.name
    }

    /// Cumulative cash flow after the last projected year.
    pub fn final_cumulative(&self) -> f64 {
        self.projections
            .last()
            .map(|p| p.cumulative_cash_flow)
            .unwrap_or(-self.strategy.implementation_cost)
    }

    pub fn net_series(&self) -> Vec<f64> {
        self.projections.iter().map(|p| p.net_cash_flow).collect()
    }

    pub fn cumulative_series(&self) -> Vec<f64> {
        self.projections
            .iter()
            .map(|p| p.cumulative_cash_flow)
            .collect()
    }

    pub fn discounted_series(&self) -> Vec<f64> {
        self.projections
            .iter()
            .map(|p| p.discounted_cash_flow)
            .collect()
    }

    /// True when cumulative cash flow turned non-negative within the horizon.
    pub fn pays_back(&self) -> bool {
        self.projections
            .iter()
            .any(|p| p.cumulative_cash_flow >= 0.0)
    }
}
