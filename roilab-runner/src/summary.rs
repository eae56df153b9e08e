//! Comparison summary — the headline picks shown above a strategy comparison.

use roilab_core::{StrategyId, StrategyResult};
use serde::{Deserialize, Serialize};

use crate::ranking::{best_by, RankingMetric};

/// Winners per metric plus portfolio-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub strategy_count: usize,
    pub best_roi: Option<StrategyId>,
    pub best_risk_adjusted_roi: Option<StrategyId>,
    pub fastest_payback: Option<StrategyId>,
    pub best_npv: Option<StrategyId>,
    /// Strategies whose cumulative cash flow never turns non-negative.
    pub never_pays_back: Vec<StrategyId>,
    pub combined_investment: f64,
    pub combined_benefits: f64,
}

impl ComparisonSummary {
    pub fn from_results(results: &[StrategyResult]) -> Self {
        let pick = |metric| best_by(results, metric).map(StrategyResult::id);
        Self {
            strategy_count: results.len(),
            best_roi: pick(RankingMetric::Roi),
            best_risk_adjusted_roi: pick(RankingMetric::RiskAdjustedRoi),
            fastest_payback: pick(RankingMetric::PaybackPeriod),
            best_npv: pick(RankingMetric::Npv),
            never_pays_back: results
                .iter()
                .filter(|r| !r.pays_back())
                .map(StrategyResult::id)
                .collect(),
            combined_investment: results.iter().map(|r| r.total_investment).sum(),
            combined_benefits: results.iter().map(|r| r.total_benefits).sum(),
        }
    }
}
