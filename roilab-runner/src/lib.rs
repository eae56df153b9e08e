//! RoiLab Runner — portfolio comparison, ranking, configuration, export.
//!
//! This crate builds on `roilab-core` to provide:
//! - Bounded portfolio of strategies sharing one business context
//! - Parallel evaluation and stable ranking by ROI, risk-adjusted ROI, payback, etc.
//! - Comparison summary (best picks, strategies that never pay back)
//! - TOML portfolio configuration with per-strategy overrides
//! - JSON / CSV / Markdown rendering for the export layer

pub mod config;
pub mod export;
pub mod portfolio;
pub mod ranking;
pub mod summary;

pub use config::{ConfigError, PortfolioConfig, StrategyEntry, StrategyOverrides};
pub use export::{
    export_json, export_projections_csv, export_summary_csv, generate_markdown, import_json,
    ComparisonReport, SCHEMA_VERSION,
};
pub use portfolio::{Portfolio, PortfolioError};
pub use ranking::{best_by, rank_results, RankingMetric, SortOrder};
pub use summary::ComparisonSummary;
