//! Ranking — metric selector and stable ordering of strategy results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use roilab_core::StrategyResult;
use serde::{Deserialize, Serialize};

/// Which result field to rank by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    Roi,
    RiskAdjustedRoi,
    PaybackPeriod,
    NetBenefit,
    IrrApprox,
    Npv,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 6] = [
        Self::Roi,
        Self::RiskAdjustedRoi,
        Self::PaybackPeriod,
        Self::NetBenefit,
        Self::IrrApprox,
        Self::Npv,
    ];

    /// Extract the relevant value from a result.
    pub fn extract(&self, result: &StrategyResult) -> f64 {
        match self {
            Self::Roi => result.roi_percent,
            Self::RiskAdjustedRoi => result.risk_adjusted_roi_percent,
            Self::PaybackPeriod => f64::from(result.payback_period_months),
            Self::NetBenefit => result.net_benefit,
            Self::IrrApprox => result.irr_approx_percent,
            Self::Npv => result.npv,
        }
    }

    /// Whether higher values are better for this metric.
    ///
    /// Payback: fewer months is better.
    pub fn is_higher_better(&self) -> bool {
        !matches!(self, Self::PaybackPeriod)
    }

    /// Order that puts the best result first.
    pub fn best_first(&self) -> SortOrder {
        if self.is_higher_better() {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Roi => "ROI",
            Self::RiskAdjustedRoi => "Risk-adjusted ROI",
            Self::PaybackPeriod => "Payback",
            Self::NetBenefit => "Net benefit",
            Self::IrrApprox => "IRR (approx.)",
            Self::Npv => "NPV",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Roi => "roi",
            Self::RiskAdjustedRoi => "risk-adjusted-roi",
            Self::PaybackPeriod => "payback",
            Self::NetBenefit => "net-benefit",
            Self::IrrApprox => "irr",
            Self::Npv => "npv",
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| {
                format!("unknown metric '{s}'. Valid: roi, risk-adjusted-roi, payback, net-benefit, irr, npv")
            })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("unknown order '{s}'. Valid: asc, desc")),
        }
    }
}

/// Stable sort of `results` by `metric`.
///
/// Ties keep their relative input order in both directions.
pub fn rank_results(results: &mut [StrategyResult], metric: RankingMetric, order: SortOrder) {
    results.sort_by(|a, b| {
        let ord = metric.extract(a).total_cmp(&metric.extract(b));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Best result under the metric's natural direction. First wins ties.
pub fn best_by(results: &[StrategyResult], metric: RankingMetric) -> Option<&StrategyResult> {
    results.iter().reduce(|best, candidate| {
        let cmp = metric.extract(candidate).total_cmp(&metric.extract(best));
        let better = if metric.is_higher_better() {
            cmp == Ordering::Greater
        } else {
            cmp == Ordering::Less
        };
        if better {
            candidate
        } else {
            best
        }
    })
}
