//! Loan vs liquidation CLI
//!
//! Commands:
//! - `point` - evaluate one (rate, return, contribution) triple in detail
//! - `rate-vs-return`, `sensitivity`, `contribution-vs-rate` - run one standard analysis
//! - `all` - run the three standard analyses

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use fido_liquidation::analysis::{run_analysis, AnalysisKind, AnalysisSettings};
use fido_liquidation::export::{export_view, ExportFormat};
use fido_liquidation::scenario::{evaluate_point_detailed, GridPoint, PointOutcome, ScenarioConfig};

#[derive(Parser)]
#[command(
    name = "fido-liquidation",
    about = "Compare borrowing against a portfolio with selling part of it"
)]
struct Cli {
    /// Scenario JSON file (months_pre_mortgage, loan_needed, capital_gain_tax_rate).
    /// Defaults to 120 months, 64,650 needed, 26% tax.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate both strategies at a single point.
    Point {
        /// Loan interest rate as an annual fraction (e.g. 0.045).
        #[arg(long)]
        rate: f64,

        /// Portfolio return as an annual fraction (e.g. 0.065).
        #[arg(long = "return")]
        portfolio_return: f64,

        /// Monthly contribution, also used as the loan installment.
        #[arg(long)]
        contribution: f64,

        /// Print the breakdown as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Loan rate vs portfolio return surface.
    RateVsReturn(ExportArgs),
    /// Break-even lines over portfolio return for several loan rates.
    Sensitivity(ExportArgs),
    /// Contribution vs loan rate surface.
    ContributionVsRate(ExportArgs),
    /// Run all three analyses.
    All(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Analysis settings JSON file; missing fields use defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output directory for exported views.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Export format.
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    format: FormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScenarioConfig::from_json_path(path)
            .with_context(|| format!("loading scenario config {}", path.display()))?,
        None => ScenarioConfig::default_mortgage(),
    };

    match cli.command {
        Commands::Point { rate, portfolio_return, contribution, json } => {
            cmd_point(&config, GridPoint::new(rate, portfolio_return, contribution), json)
        }
        Commands::RateVsReturn(args) => cmd_analyses(&config, &[AnalysisKind::RateVsReturn], &args),
        Commands::Sensitivity(args) => cmd_analyses(&config, &[AnalysisKind::Sensitivity], &args),
        Commands::ContributionVsRate(args) => {
            cmd_analyses(&config, &[AnalysisKind::ContributionVsRate], &args)
        }
        Commands::All(args) => cmd_analyses(&config, &AnalysisKind::ALL, &args),
    }
}

fn cmd_point(config: &ScenarioConfig, point: GridPoint, json: bool) -> Result<()> {
    let outcome = evaluate_point_detailed(point, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Scenario: {} months, {:.2} needed, {:.1}% capital-gains tax",
        config.months_pre_mortgage,
        config.loan_needed,
        config.capital_gain_tax_rate * 100.0);
    println!("Point:    {}", point);
    println!();

    match outcome {
        PointOutcome::Evaluated(eval) => {
            println!("  Capital at mortgage:     {:>14.2}", eval.capital_at_mortgage);
            println!("  Months to repay loan:    {:>14.2}", eval.months_to_repay);
            println!("  Loan strategy wealth:    {:>14.2}", eval.leverage_wealth);
            println!("  Liquidation wealth:      {:>14.2}", eval.liquidation.total);
            println!("    effective tax rate:    {:>13.2}%", eval.liquidation.effective_tax_rate * 100.0);
            println!("    gross withdrawal:      {:>14.2}", eval.liquidation.gross_withdrawal);
            println!("  Difference (loan - sell): {:>13.2}", eval.difference);
            let winner = if eval.difference > 0.0 { "borrowing" } else { "liquidating" };
            println!("\n  {} ends ahead", winner);
        }
        PointOutcome::NonViable { reason, .. } => {
            println!("  Not comparable: {}", reason);
        }
    }
    Ok(())
}

fn cmd_analyses(config: &ScenarioConfig, kinds: &[AnalysisKind], args: &ExportArgs) -> Result<()> {
    let settings = load_settings(args.settings.as_deref())?;

    for &kind in kinds {
        println!("--- Running {} ---", kind.file_stem());
        let view = run_analysis(kind, config, &settings)
            .with_context(|| format!("running {}", kind.file_stem()))?;
        let path = export_view(&view, &args.output_dir, kind.file_stem(), args.format.into())?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<AnalysisSettings> {
    match path {
        Some(path) => AnalysisSettings::from_json_path(path)
            .with_context(|| format!("loading analysis settings {}", path.display())),
        None => Ok(AnalysisSettings::default()),
    }
}
