//! Projection engine — year-by-year cash flows and summary metrics for one strategy.
//!
//! `project()` is a pure function of its two inputs. It never caches, never
//! reads the clock, and either returns a complete `StrategyResult` or fails
//! before computing anything.

use thiserror::Error;

use crate::domain::{GlobalContext, StrategyConfig, StrategyResult, YearlyProjection};

/// Assumed operating cost as a fraction of revenue. Cost-reduction
/// percentages apply to this base.
pub const COST_TO_REVENUE_RATIO: f64 = 0.4;

/// Assumed fully-loaded annual cost of one employee. Productivity
/// percentages apply to this base.
pub const FULLY_LOADED_EMPLOYEE_COST: f64 = 75_000.0;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest projection horizon accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Errors from the projection engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

fn invalid(msg: impl Into<String>) -> ProjectionError {
    ProjectionError::InvalidConfiguration(msg.into())
}

/// Reject non-finite or negative values.
fn require_non_negative(field: &str, value: f64) -> Result<(), ProjectionError> {
    if !value.is_finite() {
        return Err(invalid(format!("{field} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(invalid(format!("{field} must be >= 0, got {value}")));
    }
    Ok(())
}

/// Validate the shared business context.
pub fn validate_context(context: &GlobalContext) -> Result<(), ProjectionError> {
    if !context.annual_revenue.is_finite() || context.annual_revenue <= 0.0 {
        return Err(invalid(format!(
            "annual_revenue must be > 0, got {}",
            context.annual_revenue
        )));
    }
    require_non_negative("discount_rate_percent", context.discount_rate_percent)
}

/// Validate a single strategy's parameters.
pub fn validate_strategy(strategy: &StrategyConfig) -> Result<(), ProjectionError> {
    if strategy.time_horizon_years < 1 {
        return Err(invalid(format!(
            "{}: time_horizon_years must be >= 1",
            strategy.name
        )));
    }
    if strategy.time_horizon_years > MAX_HORIZON_YEARS {
        return Err(invalid(format!(
            "{}: time_horizon_years must be <= {MAX_HORIZON_YEARS}, got {}",
            strategy.name, strategy.time_horizon_years
        )));
    }

    require_non_negative("implementation_cost", strategy.implementation_cost)?;
    require_non_negative("annual_maintenance_cost", strategy.annual_maintenance_cost)?;
    require_non_negative("revenue_increase_percent", strategy.revenue_increase_percent)?;
    require_non_negative("cost_reduction_percent", strategy.cost_reduction_percent)?;
    require_non_negative(
        "employee_productivity_percent",
        strategy.employee_productivity_percent,
    )?;

    if !(0.0..=10.0).contains(&strategy.risk_factor) {
        return Err(invalid(format!(
            "risk_factor must be within 0..=10, got {}",
            strategy.risk_factor
        )));
    }

    // Total investment is the ROI denominator.
    if strategy.implementation_cost == 0.0 && strategy.annual_maintenance_cost == 0.0 {
        return Err(invalid(format!(
            "{}: implementation and maintenance costs are both zero",
            strategy.name
        )));
    }

    Ok(())
}

/// Fraction of full benefits realized in `year` given the rollout length.
///
/// Benefits ramp only while `year <= months / 12`. Because `year` starts at 1,
/// rollouts shorter than twelve months deliver full benefits from year 1.
pub fn ramp_fraction(year: u32, time_to_implement_months: u32) -> f64 {
    let implementation_years = f64::from(time_to_implement_months) / f64::from(MONTHS_PER_YEAR);
    let y = f64::from(year);
    if y <= implementation_years {
        (y - implementation_years + 1.0).max(0.0)
    } else {
        1.0
    }
}

/// Months into `year` at which cumulative cash flow crossed zero.
fn payback_months(year: u32, cumulative: f64, net_cash_flow: f64) -> u32 {
    let previous = cumulative - net_cash_flow;
    let month_fraction = if net_cash_flow == 0.0 {
        0.0
    } else {
        (previous.abs() / net_cash_flow.abs()).min(1.0)
    };
    (year - 1) * MONTHS_PER_YEAR + (month_fraction * f64::from(MONTHS_PER_YEAR)).ceil() as u32
}

/// Project one strategy over its horizon.
pub fn project(
    strategy: &StrategyConfig,
    context: &GlobalContext,
) -> Result<StrategyResult, ProjectionError> {
    validate_context(context)?;
    validate_strategy(strategy)?;

    let horizon = strategy.time_horizon_years;
    let revenue = context.annual_revenue;
    let employees = f64::from(context.employee_count);
    let discount_base = 1.0 + context.discount_rate_percent / 100.0;

    let mut projections = Vec::with_capacity(horizon as usize);
    let mut cumulative = -strategy.implementation_cost;
    let mut payback: Option<u32> = None;
    let mut total_investment = 0.0;
    let mut total_revenue = 0.0;
    let mut total_cost_savings = 0.0;
    let mut total_discounted = 0.0;

    for year in 1..=horizon {
        let ramp = ramp_fraction(year, strategy.time_to_implement_months);

        let revenue_gain = revenue * (strategy.revenue_increase_percent / 100.0) * ramp;
        let operating_savings =
            revenue * COST_TO_REVENUE_RATIO * (strategy.cost_reduction_percent / 100.0) * ramp;
        let productivity_gain = employees
            * FULLY_LOADED_EMPLOYEE_COST
            * (strategy.employee_productivity_percent / 100.0)
            * ramp;
        let cost_savings_gain = operating_savings + productivity_gain;

        let investment_outflow = if year == 1 {
            strategy.annual_maintenance_cost + strategy.implementation_cost
        } else {
            strategy.annual_maintenance_cost
        };

        let net_cash_flow = revenue_gain + cost_savings_gain - investment_outflow;
        cumulative += net_cash_flow;

        if payback.is_none() && cumulative >= 0.0 {
            payback = Some(payback_months(year, cumulative, net_cash_flow));
        }

        let discounted_cash_flow = net_cash_flow / discount_base.powi(year as i32);

        total_investment += investment_outflow;
        total_revenue += revenue_gain;
        total_cost_savings += cost_savings_gain;
        total_discounted += discounted_cash_flow;

        projections.push(YearlyProjection {
            year,
            ramp_fraction: ramp,
            investment_outflow,
            revenue_gain,
            cost_savings_gain,
            net_cash_flow,
            cumulative_cash_flow: cumulative,
            discounted_cash_flow,
        });
    }

    let total_benefits = total_revenue + total_cost_savings;
    let net_benefit = total_benefits - total_investment;
    let roi_percent = net_benefit / total_investment * 100.0;
    let risk_adjusted_roi_percent = roi_percent * (1.0 - strategy.risk_factor / 10.0);
    let irr_approx_percent =
        roi_percent / f64::from(horizon) + context.discount_rate_percent / 2.0;

    Ok(StrategyResult {
        strategy: strategy.clone(),
        projections,
        total_investment,
        total_revenue,
        total_cost_savings,
        total_benefits,
        net_benefit,
        roi_percent,
        risk_adjusted_roi_percent,
        irr_approx_percent,
        npv: total_discounted - strategy.implementation_cost,
        payback_period_months: payback.unwrap_or(horizon * MONTHS_PER_YEAR),
    })
}
