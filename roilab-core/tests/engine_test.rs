//! Integration tests for the projection engine.
//!
//! Tests:
//! 1. Worked scenario: conservative preset against a $10M / 100-employee business
//! 2. Rollout ramp: 18- and 24-month implementations scale early-year benefits
//! 3. Discounting and NPV
//! 4. Preset catalog behavior through the public API

use roilab_core::engine::{COST_TO_REVENUE_RATIO, FULLY_LOADED_EMPLOYEE_COST};
use roilab_core::{lookup, project, GlobalContext, ProjectionError, StrategyPreset};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

fn reference_context() -> GlobalContext {
    GlobalContext::new(10_000_000.0, 100, 5.0)
}

// ──────────────────────────────────────────────
// Worked scenario
// ──────────────────────────────────────────────

#[test]
fn conservative_year_one() {
    let cfg = lookup("conservative").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();
    let y1 = &result.projections[0];

    assert_eq!(y1.year, 1);
    assert_close(y1.revenue_gain, 500_000.0, 1e-6);
    assert_close(y1.cost_savings_gain, 1_070_000.0, 1e-6);
    assert_close(y1.investment_outflow, 144_000.0, 1e-6);
    assert_close(y1.net_cash_flow, 1_426_000.0, 1e-6);
    assert_close(y1.cumulative_cash_flow, 1_306_000.0, 1e-6);
    assert_eq!(result.payback_period_months, 2);
}

#[test]
fn conservative_five_year_totals() {
    let cfg = lookup("conservative").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();

    assert_eq!(result.projections.len(), 5);
    assert_close(result.total_investment, 240_000.0, 1e-6);
    assert_close(result.total_revenue, 2_500_000.0, 1e-6);
    assert_close(result.total_cost_savings, 5_350_000.0, 1e-6);
    assert_close(result.total_benefits, 7_850_000.0, 1e-6);
    assert_close(result.net_benefit, 7_610_000.0, 1e-6);
    assert_close(result.roi_percent, 3170.833_333, 1e-3);
}

#[test]
fn conservative_derived_metrics() {
    let cfg = lookup("conservative").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();

    // risk 3 → 70% of ROI
    assert_close(
        result.risk_adjusted_roi_percent,
        result.roi_percent * 0.7,
        1e-9,
    );
    // ROI / 5 years + 5% / 2
    assert_close(
        result.irr_approx_percent,
        result.roi_percent / 5.0 + 2.5,
        1e-9,
    );
}

#[test]
fn later_years_carry_only_maintenance() {
    let cfg = lookup("conservative").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();
    for p in &result.projections[1..] {
        assert_close(p.investment_outflow, 24_000.0, 1e-9);
        assert_close(p.net_cash_flow, 1_546_000.0, 1e-6);
    }
}

#[test]
fn engine_constants_are_fixed() {
    assert_eq!(COST_TO_REVENUE_RATIO, 0.4);
    assert_eq!(FULLY_LOADED_EMPLOYEE_COST, 75_000.0);
}

// ──────────────────────────────────────────────
// Ramp
// ──────────────────────────────────────────────

#[test]
fn phased_rollout_halves_year_one_benefits() {
    let cfg = StrategyPreset::Phased.to_config();
    assert_eq!(cfg.time_to_implement_months, 18);
    let result = project(&cfg, &reference_context()).unwrap();

    let y1 = &result.projections[0];
    let y2 = &result.projections[1];
    assert_close(y1.ramp_fraction, 0.5, 1e-12);
    assert_close(y2.ramp_fraction, 1.0, 1e-12);
    assert_close(y1.revenue_gain * 2.0, y2.revenue_gain, 1e-6);
    assert_close(y1.cost_savings_gain * 2.0, y2.cost_savings_gain, 1e-6);
}

#[test]
fn two_year_rollout_has_no_year_one_benefits() {
    let cfg = StrategyPreset::Comprehensive.to_config();
    assert_eq!(cfg.time_to_implement_months, 24);
    let result = project(&cfg, &reference_context()).unwrap();

    let y1 = &result.projections[0];
    assert_eq!(y1.ramp_fraction, 0.0);
    assert_eq!(y1.revenue_gain, 0.0);
    assert_eq!(y1.cost_savings_gain, 0.0);
    assert_close(
        y1.net_cash_flow,
        -(cfg.implementation_cost + cfg.annual_maintenance_cost),
        1e-9,
    );
    // Payback cannot happen in a year with no benefits.
    assert!(result.payback_period_months > 12);
}

#[test]
fn six_month_rollout_is_not_ramped() {
    let cfg = StrategyPreset::Conservative.to_config();
    let result = project(&cfg, &reference_context()).unwrap();
    assert!(result.projections.iter().all(|p| p.ramp_fraction == 1.0));
}

// ──────────────────────────────────────────────
// Discounting
// ──────────────────────────────────────────────

#[test]
fn discounted_flows_use_compound_rate() {
    let cfg = lookup("balanced").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();
    for p in &result.projections {
        let expected = p.net_cash_flow / 1.05_f64.powi(p.year as i32);
        assert_close(p.discounted_cash_flow, expected, 1e-6);
    }
}

#[test]
fn npv_sums_discounted_flows_less_implementation() {
    let cfg = lookup("aggressive").unwrap();
    let result = project(&cfg, &reference_context()).unwrap();
    let discounted: f64 = result.discounted_series().iter().sum();
    assert_close(result.npv, discounted - cfg.implementation_cost, 1e-6);
}

// ──────────────────────────────────────────────
// Failures
// ──────────────────────────────────────────────

#[test]
fn invalid_inputs_fail_atomically() {
    let mut cfg = lookup("balanced").unwrap();
    cfg.implementation_cost = -5.0;
    match project(&cfg, &reference_context()) {
        Err(ProjectionError::InvalidConfiguration(msg)) => {
            assert!(msg.contains("implementation_cost"), "message: {msg}");
        }
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn negative_discount_rate_is_rejected() {
    let cfg = lookup("balanced").unwrap();
    let ctx = GlobalContext::new(1_000_000.0, 10, -1.0);
    assert!(project(&cfg, &ctx).is_err());
}

#[test]
fn zero_employees_contribute_no_productivity() {
    let cfg = lookup("conservative").unwrap();
    let ctx = GlobalContext::new(10_000_000.0, 0, 5.0);
    let result = project(&cfg, &ctx).unwrap();
    // Only the operating-cost component remains: 10M × 0.4 × 8%
    assert_close(result.projections[0].cost_savings_gain, 320_000.0, 1e-6);
}
