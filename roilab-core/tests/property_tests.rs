//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism — identical inputs give identical results
//! 2. Cash-flow conservation — sum(net) − implementation == final cumulative
//! 3. Payback bound — 0 ≤ payback ≤ horizon × 12
//! 4. Monotonic horizon — a longer horizon never lowers total benefits
//! 5. Shape — one projection per year, numbered 1..=horizon

use proptest::prelude::*;
use roilab_core::{project, GlobalContext, StrategyConfig, StrategyId};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_context() -> impl Strategy<Value = GlobalContext> {
    (100_000.0..100_000_000.0_f64, 0u32..5_000, 0.0..30.0_f64).prop_map(
        |(annual_revenue, employee_count, discount_rate_percent)| GlobalContext {
            annual_revenue,
            employee_count,
            discount_rate_percent,
        },
    )
}

fn arb_strategy() -> impl Strategy<Value = StrategyConfig> {
    (
        0.0..2_000_000.0_f64,
        1.0..500_000.0_f64,
        0.0..40.0_f64,
        0.0..40.0_f64,
        0.0..40.0_f64,
        0u32..48,
        0.0..=10.0_f64,
        1u32..15,
    )
        .prop_map(
            |(impl_cost, maint, rev, cost, prod, months, risk, horizon)| StrategyConfig {
                id: StrategyId(1),
                name: "generated".into(),
                implementation_cost: impl_cost,
                annual_maintenance_cost: maint,
                revenue_increase_percent: rev,
                cost_reduction_percent: cost,
                employee_productivity_percent: prod,
                time_to_implement_months: months,
                risk_factor: risk,
                time_horizon_years: horizon,
            },
        )
}

proptest! {
    #[test]
    fn projection_is_deterministic(s in arb_strategy(), c in arb_context()) {
        let a = project(&s, &c).unwrap();
        let b = project(&s, &c).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn cash_flow_is_conserved(s in arb_strategy(), c in arb_context()) {
        let r = project(&s, &c).unwrap();
        let net_sum: f64 = r.net_series().iter().sum();
        let expected = net_sum - s.implementation_cost;
        let actual = r.final_cumulative();
        let scale: f64 = r.net_series().iter().map(|v| v.abs()).sum::<f64>() + s.implementation_cost;
        let tol = 1e-9 * scale.max(1.0);
        prop_assert!((expected - actual).abs() <= tol, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn payback_is_bounded(s in arb_strategy(), c in arb_context()) {
        let r = project(&s, &c).unwrap();
        prop_assert!(r.payback_period_months <= s.time_horizon_years * 12);
    }

    #[test]
    fn longer_horizon_never_lowers_benefits(
        s in arb_strategy(),
        c in arb_context(),
        extra in 1u32..10,
    ) {
        let short = project(&s, &c).unwrap();
        let mut longer = s.clone();
        longer.time_horizon_years += extra;
        let long = project(&longer, &c).unwrap();
        prop_assert!(long.total_benefits >= short.total_benefits);
    }

    #[test]
    fn one_projection_per_year(s in arb_strategy(), c in arb_context()) {
        let r = project(&s, &c).unwrap();
        prop_assert_eq!(r.projections.len(), s.time_horizon_years as usize);
        for (i, p) in r.projections.iter().enumerate() {
            prop_assert_eq!(p.year as usize, i + 1);
            prop_assert!((0.0..=1.0).contains(&p.ramp_fraction));
        }
    }

    #[test]
    fn totals_are_consistent(s in arb_strategy(), c in arb_context()) {
        let r = project(&s, &c).unwrap();
        prop_assert_eq!(r.total_benefits, r.total_revenue + r.total_cost_savings);
        prop_assert_eq!(r.net_benefit, r.total_benefits - r.total_investment);
        prop_assert!(r.total_investment > 0.0);
    }
}
