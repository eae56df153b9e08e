//! RoiLab CLI — preset listing, single projections, and portfolio comparison.
//!
//! Commands:
//! - `presets` — list the preset catalog with key parameters
//! - `project` — project one preset against a business context
//! - `compare` — evaluate and rank a portfolio from a TOML file or preset list
//!
//! Output goes to stdout; logs go to stderr (`RUST_LOG` or `--verbose`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use roilab_core::{project, GlobalContext, StrategyPreset, StrategyResult};
use roilab_runner::{
    export_json, export_projections_csv, export_summary_csv, generate_markdown,
    ComparisonReport, Portfolio, PortfolioConfig, RankingMetric, SortOrder,
};

#[derive(Parser)]
#[command(
    name = "roilab",
    about = "RoiLab CLI — multi-strategy ROI projection and comparison"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the preset catalog.
    Presets,
    /// Project a single preset over its horizon.
    Project {
        /// Preset key: conservative, balanced, aggressive, phased, comprehensive.
        #[arg(long)]
        preset: String,

        /// Override the preset's horizon in years.
        #[arg(long)]
        horizon: Option<u32>,

        #[command(flatten)]
        context: ContextArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Evaluate and rank a portfolio of strategies.
    Compare {
        /// Path to a TOML portfolio file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset keys to compare (repeatable), used when no --config is given.
        #[arg(long = "preset")]
        presets: Vec<String>,

        #[command(flatten)]
        context: ContextArgs,

        /// Metric: roi, risk-adjusted-roi, payback, net-benefit, irr, npv.
        #[arg(long, default_value = "roi")]
        rank_by: RankingMetric,

        /// asc or desc. Defaults to best-first for the chosen metric.
        #[arg(long)]
        order: Option<SortOrder>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

/// Business context flags. Ignored when a --config file supplies its own.
#[derive(Args)]
struct ContextArgs {
    /// Annual revenue.
    #[arg(long, default_value_t = 10_000_000.0)]
    revenue: f64,

    /// Employee headcount.
    #[arg(long, default_value_t = 100)]
    employees: u32,

    /// Discount rate in percent.
    #[arg(long, default_value_t = 5.0)]
    discount_rate: f64,
}

impl ContextArgs {
    fn to_context(&self) -> GlobalContext {
        GlobalContext::new(self.revenue, self.employees, self.discount_rate)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Presets => {
            run_presets();
            Ok(())
        }
        Commands::Project {
            preset,
            horizon,
            context,
            format,
        } => run_project(&preset, horizon, &context, format),
        Commands::Compare {
            config,
            presets,
            context,
            rank_by,
            order,
            format,
        } => run_compare(config, presets, &context, rank_by, order, format),
    }
}

fn run_presets() {
    println!(
        "{:<14} {:<30} {:>12} {:>12} {:>8} {:>6}  Description",
        "Key", "Name", "Impl. Cost", "Maint./yr", "Rollout", "Risk"
    );
    println!("{}", "-".repeat(120));
    for preset in StrategyPreset::ALL {
        let cfg = preset.to_config();
        println!(
            "{:<14} {:<30} {:>12.0} {:>12.0} {:>6} mo {:>6.1}  {}",
            preset.key(),
            preset.display_name(),
            cfg.implementation_cost,
            cfg.annual_maintenance_cost,
            cfg.time_to_implement_months,
            cfg.risk_factor,
            preset.description(),
        );
    }
}

fn run_project(
    preset_key: &str,
    horizon: Option<u32>,
    context: &ContextArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut strategy = roilab_core::lookup(preset_key)?;
    if let Some(years) = horizon {
        strategy.time_horizon_years = years;
    }
    let ctx = context.to_context();
    debug!(?ctx, preset = preset_key, "projecting single strategy");

    let result = project(&strategy, &ctx)?;

    match format {
        OutputFormat::Table => print_projection(&result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .context("failed to serialize StrategyResult")?;
            println!("{json}");
        }
        OutputFormat::Csv => print!("{}", export_projections_csv(std::slice::from_ref(&result))?),
        OutputFormat::Markdown => {
            let report = ComparisonReport::new(
                ctx,
                vec![result],
                RankingMetric::default(),
                SortOrder::default(),
            );
            print!("{}", generate_markdown(&report));
        }
    }
    Ok(())
}

fn run_compare(
    config_path: Option<PathBuf>,
    presets: Vec<String>,
    context: &ContextArgs,
    rank_by: RankingMetric,
    order: Option<SortOrder>,
    format: OutputFormat,
) -> Result<()> {
    if config_path.is_some() && !presets.is_empty() {
        bail!("--config and --preset are mutually exclusive");
    }

    let portfolio = if let Some(path) = config_path {
        info!(path = %path.display(), "loading portfolio config");
        PortfolioConfig::from_file(&path)?.into_portfolio()?
    } else {
        build_portfolio_from_presets(&presets, context.to_context())?
    };

    let order = order.unwrap_or_else(|| rank_by.best_first());
    let report = ComparisonReport::from_portfolio(&portfolio, rank_by, order)?;

    match format {
        OutputFormat::Table => print_comparison(&report),
        OutputFormat::Json => println!("{}", export_json(&report)?),
        OutputFormat::Csv => print!("{}", export_summary_csv(&report.results)?),
        OutputFormat::Markdown => print!("{}", generate_markdown(&report)),
    }
    Ok(())
}

fn build_portfolio_from_presets(keys: &[String], context: GlobalContext) -> Result<Portfolio> {
    let Some((first, rest)) = keys.split_first() else {
        bail!("one of --config or --preset is required");
    };
    let mut portfolio = Portfolio::new(context, first)?;
    for key in rest {
        portfolio
            .add_strategy(key)
            .with_context(|| format!("cannot add preset '{key}'"))?;
    }
    Ok(portfolio)
}

fn print_projection(result: &StrategyResult) {
    println!();
    println!("=== {} ===", result.name());
    println!(
        "{:>4} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "Ramp", "Investment", "Revenue", "Savings", "Net", "Cumulative", "Discounted"
    );
    println!("{}", "-".repeat(102));
    for p in &result.projections {
        println!(
            "{:>4} {:>6.2} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0}",
            p.year,
            p.ramp_fraction,
            p.investment_outflow,
            p.revenue_gain,
            p.cost_savings_gain,
            p.net_cash_flow,
            p.cumulative_cash_flow,
            p.discounted_cash_flow,
        );
    }
    println!();
    println!("Total Investment:  {:.0}", result.total_investment);
    println!("Total Benefits:    {:.0}", result.total_benefits);
    println!("Net Benefit:       {:.0}", result.net_benefit);
    println!("ROI:               {:.1}%", result.roi_percent);
    println!("Risk-adj. ROI:     {:.1}%", result.risk_adjusted_roi_percent);
    println!("IRR (approx.):     {:.1}%", result.irr_approx_percent);
    println!("NPV:               {:.0}", result.npv);
    println!("Payback:           {} months", result.payback_period_months);
    if !result.pays_back() {
        println!();
        println!("WARNING: cumulative cash flow stays negative over the horizon");
    }
    println!();
}

fn print_comparison(report: &ComparisonReport) {
    println!();
    println!(
        "=== Strategy Comparison (by {}, {:?}) ===",
        report.ranked_by.label(),
        report.order
    );
    println!(
        "{:>2} {:<30} {:>12} {:>12} {:>10} {:>10} {:>10} {:>12} {:>8}",
        "#", "Strategy", "Investment", "Benefits", "ROI", "Risk-adj.", "IRR~", "NPV", "Payback"
    );
    println!("{}", "-".repeat(114));
    for (rank, r) in report.results.iter().enumerate() {
        println!(
            "{:>2} {:<30} {:>12.0} {:>12.0} {:>9.1}% {:>9.1}% {:>9.1}% {:>12.0} {:>5} mo",
            rank + 1,
            r.name(),
            r.total_investment,
            r.total_benefits,
            r.roi_percent,
            r.risk_adjusted_roi_percent,
            r.irr_approx_percent,
            r.npv,
            r.payback_period_months,
        );
    }
    println!();
    println!("Fingerprint: {}", report.fingerprint.short());
    for id in &report.summary.never_pays_back {
        if let Some(r) = report.results.iter().find(|r| r.id() == *id) {
            println!("WARNING: {} does not pay back within its horizon", r.name());
        }
    }
    println!();
}
