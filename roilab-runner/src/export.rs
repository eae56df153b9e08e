//! Reporting and export — JSON, CSV, and Markdown rendering of comparisons.
//!
//! Provides three formats for the export layer:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: per-year projections and per-strategy summaries
//! - **Markdown**: human-readable side-by-side comparison
//!
//! Everything renders to a `String`; callers decide where it goes.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roilab_core::{GlobalContext, InputFingerprint, StrategyResult};

use crate::portfolio::Portfolio;
use crate::ranking::{rank_results, RankingMetric, SortOrder};
use crate::summary::ComparisonSummary;

/// Current schema version for exported reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Everything a consumer needs to render or archive a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub context: GlobalContext,
    pub fingerprint: InputFingerprint,
    pub ranked_by: RankingMetric,
    pub order: SortOrder,
    pub results: Vec<StrategyResult>,
    pub summary: ComparisonSummary,
}

impl ComparisonReport {
    /// Assemble a report, ranking `results` by `ranked_by`.
    ///
    /// The fingerprint covers the inputs in the order `results` arrive.
    pub fn new(
        context: GlobalContext,
        mut results: Vec<StrategyResult>,
        ranked_by: RankingMetric,
        order: SortOrder,
    ) -> Self {
        let strategies: Vec<_> = results.iter().map(|r| r.strategy.clone()).collect();
        let fingerprint = InputFingerprint::of(&strategies, &context);
        rank_results(&mut results, ranked_by, order);
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            context,
            fingerprint,
            ranked_by,
            order,
            summary: ComparisonSummary::from_results(&results),
            results,
        }
    }

    /// Evaluate a portfolio and wrap the ranked results.
    pub fn from_portfolio(
        portfolio: &Portfolio,
        ranked_by: RankingMetric,
        order: SortOrder,
    ) -> Result<Self> {
        let results = portfolio
            .evaluate_all()
            .context("failed to evaluate portfolio")?;
        Ok(Self::new(*portfolio.context(), results, ranked_by, order))
    }
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a report to pretty JSON.
pub fn export_json(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ComparisonReport to JSON")
}

/// Deserialize a report from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ComparisonReport> {
    let report: ComparisonReport =
        serde_json::from_str(json).context("failed to deserialize ComparisonReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// One row per strategy-year.
///
/// Columns: strategy_id, strategy_name, year, ramp_fraction, investment_outflow,
/// revenue_gain, cost_savings_gain, net_cash_flow, cumulative_cash_flow,
/// discounted_cash_flow
pub fn export_projections_csv(results: &[StrategyResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "strategy_id",
        "strategy_name",
        "year",
        "ramp_fraction",
        "investment_outflow",
        "revenue_gain",
        "cost_savings_gain",
        "net_cash_flow",
        "cumulative_cash_flow",
        "discounted_cash_flow",
    ])?;

    for r in results {
        for p in &r.projections {
            wtr.write_record([
                &r.id().0.to_string(),
                &r.strategy.name,
                &p.year.to_string(),
                &format!("{:.4}", p.ramp_fraction),
                &format!("{:.2}", p.investment_outflow),
                &format!("{:.2}", p.revenue_gain),
                &format!("{:.2}", p.cost_savings_gain),
                &format!("{:.2}", p.net_cash_flow),
                &format!("{:.2}", p.cumulative_cash_flow),
                &format!("{:.2}", p.discounted_cash_flow),
            ])?;
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// One row per strategy with its headline metrics.
pub fn export_summary_csv(results: &[StrategyResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "strategy_id",
        "strategy_name",
        "horizon_years",
        "total_investment",
        "total_benefits",
        "net_benefit",
        "roi_percent",
        "risk_adjusted_roi_percent",
        "irr_approx_percent",
        "npv",
        "payback_period_months",
    ])?;

    for r in results {
        wtr.write_record([
            &r.id().0.to_string(),
            &r.strategy.name,
            &r.strategy.time_horizon_years.to_string(),
            &format!("{:.2}", r.total_investment),
            &format!("{:.2}", r.total_benefits),
            &format!("{:.2}", r.net_benefit),
            &format!("{:.2}", r.roi_percent),
            &format!("{:.2}", r.risk_adjusted_roi_percent),
            &format!("{:.2}", r.irr_approx_percent),
            &format!("{:.2}", r.npv),
            &r.payback_period_months.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown comparison report.
pub fn generate_markdown(report: &ComparisonReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Strategy Comparison\n\n");

    md.push_str("## Context\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Annual Revenue | {:.0} |\n",
        report.context.annual_revenue
    ));
    md.push_str(&format!("| Employees | {} |\n", report.context.employee_count));
    md.push_str(&format!(
        "| Discount Rate | {:.2}% |\n",
        report.context.discount_rate_percent
    ));
    md.push_str(&format!(
        "| Ranked By | {} ({:?}) |\n",
        report.ranked_by.label(),
        report.order
    ));
    md.push_str(&format!("| Fingerprint | {} |\n", report.fingerprint.short()));
    md.push('\n');

    md.push_str("## Results\n\n");
    md.push_str(
        "| # | Strategy | Investment | Benefits | ROI | Risk-adj. ROI | IRR (approx.) | NPV | Payback |\n",
    );
    md.push_str("| --- | --- | ---: | ---: | ---: | ---: | ---: | ---: | ---: |\n");
    for (rank, r) in report.results.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {:.0} | {:.0} | {:.1}% | {:.1}% | {:.1}% | {:.0} | {} mo |\n",
            rank + 1,
            r.name(),
            r.total_investment,
            r.total_benefits,
            r.roi_percent,
            r.risk_adjusted_roi_percent,
            r.irr_approx_percent,
            r.npv,
            r.payback_period_months,
        ));
    }
    md.push('\n');

    md.push_str("## Highlights\n\n");
    let name_of = |id: Option<roilab_core::StrategyId>| {
        id.and_then(|id| report.results.iter().find(|r| r.id() == id))
            .map(|r| r.name().to_string())
            .unwrap_or_else(|| "-".into())
    };
    md.push_str(&format!("- Best ROI: {}\n", name_of(report.summary.best_roi)));
    md.push_str(&format!(
        "- Best risk-adjusted ROI: {}\n",
        name_of(report.summary.best_risk_adjusted_roi)
    ));
    md.push_str(&format!(
        "- Fastest payback: {}\n",
        name_of(report.summary.fastest_payback)
    ));
    md.push_str(&format!("- Best NPV: {}\n", name_of(report.summary.best_npv)));
    for id in &report.summary.never_pays_back {
        md.push_str(&format!(
            "- **{}** does not pay back within its horizon\n",
            name_of(Some(*id))
        ));
    }
    md.push('\n');

    md.push_str("_IRR is a linear approximation (ROI / horizon + discount rate / 2)._\n");

    md
}
