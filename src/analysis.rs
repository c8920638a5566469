//! Standard analyses around a starting point, packaged for rendering
//!
//! Each analysis sweeps ranges proportional to a user-supplied starting point
//! and returns a view holding everything a plotting front end needs: titles,
//! axis labels, coordinates in display units and the surface values. Non-viable
//! cells are `None` so they are never drawn as numbers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scenario::{
    linspace, sensitivity_lines, sweep_contribution_vs_rate, sweep_rate_vs_return, AxisRole,
    ConfigError, Grid, ScenarioConfig, ScenarioError, SweepResult,
};

const WEALTH_LABEL: &str = "Additional Final Wealth (€)";

/// Starting point and grid resolution for the standard analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Monthly contribution at the centre of the analysis (default: 1000)
    #[serde(default = "default_start_contribution")]
    pub start_contribution: f64,

    /// Annual portfolio return at the centre (default: 6.5%)
    #[serde(default = "default_start_return")]
    pub start_annual_return: f64,

    /// Loan interest rate at the centre (default: 4.5%)
    #[serde(default = "default_start_loan_rate")]
    pub start_loan_rate: f64,

    /// Points per axis on the 3D surfaces
    #[serde(default = "default_surface_points")]
    pub surface_points: usize,

    /// Points along the return axis of the sensitivity lines
    #[serde(default = "default_line_points")]
    pub line_points: usize,

    /// Multiples of the start rate that get their own sensitivity line
    #[serde(default = "default_rate_ratios")]
    pub rate_ratios: Vec<f64>,

    /// Rate and return ranges span [low, high] x their start value
    #[serde(default = "default_rate_span")]
    pub rate_span: (f64, f64),

    /// Contribution range spans [low, high] x the start contribution
    #[serde(default = "default_contribution_span")]
    pub contribution_span: (f64, f64),
}

fn default_start_contribution() -> f64 { 1000.0 }
fn default_start_return() -> f64 { 0.065 }
fn default_start_loan_rate() -> f64 { 0.045 }
fn default_surface_points() -> usize { 50 }
fn default_line_points() -> usize { 100 }
fn default_rate_ratios() -> Vec<f64> { vec![0.5, 0.75, 0.9, 1.0, 1.1, 1.25, 1.5] }
fn default_rate_span() -> (f64, f64) { (0.1, 1.5) }
fn default_contribution_span() -> (f64, f64) { (0.5, 1.5) }

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            start_contribution: default_start_contribution(),
            start_annual_return: default_start_return(),
            start_loan_rate: default_start_loan_rate(),
            surface_points: default_surface_points(),
            line_points: default_line_points(),
            rate_ratios: default_rate_ratios(),
            rate_span: default_rate_span(),
            contribution_span: default_contribution_span(),
        }
    }
}

impl AnalysisSettings {
    /// Load settings from JSON; missing fields take their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn loan_rate_range(&self, n: usize) -> Vec<f64> {
        let (lo, hi) = self.rate_span;
        linspace(lo * self.start_loan_rate, hi * self.start_loan_rate, n)
    }

    pub fn return_range(&self, n: usize) -> Vec<f64> {
        let (lo, hi) = self.rate_span;
        linspace(lo * self.start_annual_return, hi * self.start_annual_return, n)
    }

    pub fn contribution_range(&self, n: usize) -> Vec<f64> {
        let (lo, hi) = self.contribution_span;
        linspace(lo * self.start_contribution, hi * self.start_contribution, n)
    }

    pub fn sensitivity_rates(&self) -> Vec<f64> {
        self.rate_ratios.iter().map(|r| self.start_loan_rate * r).collect()
    }
}

/// The three standard analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Loan rate x portfolio return surface at the start contribution
    RateVsReturn,
    /// Difference along the return axis for several fixed loan rates
    Sensitivity,
    /// Contribution x loan rate surface at the start return
    ContributionVsRate,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::RateVsReturn,
        AnalysisKind::Sensitivity,
        AnalysisKind::ContributionVsRate,
    ];

    /// Base file name for exported views
    pub fn file_stem(&self) -> &'static str {
        match self {
            AnalysisKind::RateVsReturn => "analysis_1_rate_vs_return",
            AnalysisKind::Sensitivity => "analysis_2_sensitivity",
            AnalysisKind::ContributionVsRate => "analysis_3_pac_vs_rate",
        }
    }
}

fn axis_label(role: AxisRole) -> &'static str {
    match role {
        AxisRole::InterestRate => "Loan Interest Rate (i) [%]",
        AxisRole::PortfolioReturn => "Annual Portfolio Return (r) [%]",
        AxisRole::MonthlyContribution => "Monthly PAC Investment (€)",
    }
}

/// Factor from model units to display units (rates shown in percent)
fn display_scale(role: AxisRole) -> f64 {
    if role.is_rate() { 100.0 } else { 1.0 }
}

/// A labelled 3D surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    /// Swept axis 1 in display units
    pub x: Grid<f64>,
    /// Swept axis 2 in display units
    pub y: Grid<f64>,
    /// Wealth difference, `None` where not comparable
    pub z: Grid<Option<f64>>,
    /// Symmetric colour scale bound: max |z| over drawn cells, 1 if none
    pub color_limit: f64,
}

impl SurfaceView {
    pub fn from_sweep(result: &SweepResult, title: impl Into<String>) -> Self {
        let sx = display_scale(result.roles.axis1);
        let sy = display_scale(result.roles.axis2);
        Self {
            title: title.into(),
            x_label: axis_label(result.roles.axis1).to_string(),
            y_label: axis_label(result.roles.axis2).to_string(),
            z_label: WEALTH_LABEL.to_string(),
            x: result.grid1.map(|v| v * sx),
            y: result.grid2.map(|v| v * sy),
            z: result.values.map(|d| d.value()),
            color_limit: result.max_abs_difference().unwrap_or(1.0),
        }
    }

    /// Count of cells that will be drawn
    pub fn drawn_cells(&self) -> usize {
        self.z.iter().filter(|v| v.is_some()).count()
    }
}

/// One line of the sensitivity chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub interest_rate: f64,
    pub y: Vec<Option<f64>>,
}

/// Break-even lines: wealth difference against return, one line per loan rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    /// Portfolio return in percent
    pub x: Vec<f64>,
    pub series: Vec<LineSeries>,
}

/// Output of any standard analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisView {
    Surface(SurfaceView),
    Sensitivity(SensitivityView),
}

/// Analysis 1: loan rate against portfolio return at the start contribution
pub fn run_rate_vs_return(
    config: &ScenarioConfig,
    settings: &AnalysisSettings,
) -> Result<SurfaceView, ScenarioError> {
    let rates = settings.loan_rate_range(settings.surface_points);
    let returns = settings.return_range(settings.surface_points);
    log::info!("Running rate vs return ({} x {})", rates.len(), returns.len());

    let result = sweep_rate_vs_return(config, &rates, &returns, settings.start_contribution)?;
    let title = format!(
        "Analysis 1: Loan vs. Liquidation (Fixed PAC = €{:.0})",
        settings.start_contribution
    );
    Ok(SurfaceView::from_sweep(&result, title))
}

/// Analysis 2: sensitivity of the difference to the portfolio return
pub fn run_sensitivity(
    config: &ScenarioConfig,
    settings: &AnalysisSettings,
) -> Result<SensitivityView, ScenarioError> {
    let returns = settings.return_range(settings.line_points);
    let rates = settings.sensitivity_rates();
    log::info!("Running sensitivity ({} lines x {} returns)", rates.len(), returns.len());

    let lines = sensitivity_lines(config, &rates, &returns, settings.start_contribution)?;
    let series = lines
        .into_iter()
        .map(|line| LineSeries {
            label: line.label,
            interest_rate: line.interest_rate,
            y: line.values.iter().map(|d| d.value()).collect(),
        })
        .collect();

    Ok(SensitivityView {
        title: format!(
            "Analysis 2: Break-Even Points (Fixed PAC = €{:.0})",
            settings.start_contribution
        ),
        x_label: "Annual Portfolio Return (r)".to_string(),
        y_label: WEALTH_LABEL.to_string(),
        legend_title: "Loan Interest Rate".to_string(),
        x: returns.iter().map(|r| r * 100.0).collect(),
        series,
    })
}

/// Analysis 3: contribution against loan rate at the start return
pub fn run_contribution_vs_rate(
    config: &ScenarioConfig,
    settings: &AnalysisSettings,
) -> Result<SurfaceView, ScenarioError> {
    let contributions = settings.contribution_range(settings.surface_points);
    let rates = settings.loan_rate_range(settings.surface_points);
    log::info!("Running contribution vs rate ({} x {})", contributions.len(), rates.len());

    let result =
        sweep_contribution_vs_rate(config, &contributions, &rates, settings.start_annual_return)?;
    let title = format!(
        "Analysis 3: Loan vs. Liquidation (Fixed Return = {:.1}%)",
        settings.start_annual_return * 100.0
    );
    Ok(SurfaceView::from_sweep(&result, title))
}

/// Run one analysis by kind
pub fn run_analysis(
    kind: AnalysisKind,
    config: &ScenarioConfig,
    settings: &AnalysisSettings,
) -> Result<AnalysisView, ScenarioError> {
    match kind {
        AnalysisKind::RateVsReturn => run_rate_vs_return(config, settings).map(AnalysisView::Surface),
        AnalysisKind::Sensitivity => run_sensitivity(config, settings).map(AnalysisView::Sensitivity),
        AnalysisKind::ContributionVsRate => {
            run_contribution_vs_rate(config, settings).map(AnalysisView::Surface)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_settings() -> AnalysisSettings {
        AnalysisSettings {
            surface_points: 6,
            line_points: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_ranges() {
        let settings = AnalysisSettings::default();
        let rates = settings.loan_rate_range(50);
        assert_relative_eq!(rates[0], 0.0045, max_relative = 1e-12);
        assert_relative_eq!(rates[49], 0.0675, max_relative = 1e-12);
        let pacs = settings.contribution_range(3);
        assert_eq!(pacs, vec![500.0, 1000.0, 1500.0]);
        assert_eq!(settings.sensitivity_rates().len(), 7);
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: AnalysisSettings = serde_json::from_str(r#"{"surface_points": 10}"#).unwrap();
        assert_eq!(settings.surface_points, 10);
        assert_eq!(settings.start_contribution, 1000.0);
        assert_eq!(settings.rate_span, (0.1, 1.5));
    }

    #[test]
    fn test_rate_vs_return_view() {
        let view = run_rate_vs_return(&ScenarioConfig::default_mortgage(), &small_settings()).unwrap();
        assert_eq!(view.z.shape(), (6, 6));
        assert_eq!(view.x_label, "Loan Interest Rate (i) [%]");
        assert_eq!(view.y_label, "Annual Portfolio Return (r) [%]");
        assert_eq!(view.title, "Analysis 1: Loan vs. Liquidation (Fixed PAC = €1000)");
        // Axes are in percent
        assert_relative_eq!(*view.x.get(0, 0).unwrap(), 0.45, max_relative = 1e-9);
        assert_relative_eq!(*view.y.get(5, 0).unwrap(), 9.75, max_relative = 1e-9);
        assert!(view.drawn_cells() > 0);
        let max_abs = view.z.iter().flatten().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert_eq!(view.color_limit, max_abs);
    }

    #[test]
    fn test_contribution_vs_rate_marks_underfunded_cells() {
        let settings = AnalysisSettings {
            contribution_span: (0.2, 1.5),
            ..small_settings()
        };
        let view = run_contribution_vs_rate(&ScenarioConfig::default_mortgage(), &settings).unwrap();
        assert_eq!(view.x_label, "Monthly PAC Investment (€)");
        assert_eq!(view.title, "Analysis 3: Loan vs. Liquidation (Fixed Return = 6.5%)");
        // Column 0 is 200/month: never enough capital
        for row in 0..view.z.rows() {
            assert_eq!(view.z.get(row, 0), Some(&None));
        }
        assert_eq!(*view.x.get(0, 0).unwrap(), 200.0);
    }

    #[test]
    fn test_sensitivity_view() {
        let view = run_sensitivity(&ScenarioConfig::default_mortgage(), &small_settings()).unwrap();
        assert_eq!(view.series.len(), 7);
        assert_eq!(view.series[3].label, "i = 4.50%");
        assert!(view.series.iter().all(|s| s.y.len() == view.x.len()));
        assert_eq!(view.x.len(), 8);
    }

    #[test]
    fn test_run_analysis_dispatch() {
        let config = ScenarioConfig::default_mortgage();
        for kind in AnalysisKind::ALL {
            let view = run_analysis(kind, &config, &small_settings()).unwrap();
            match (kind, view) {
                (AnalysisKind::Sensitivity, AnalysisView::Sensitivity(_)) => {}
                (AnalysisKind::RateVsReturn | AnalysisKind::ContributionVsRate, AnalysisView::Surface(_)) => {}
                (kind, _) => panic!("unexpected view for {:?}", kind),
            }
        }
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let settings = AnalysisSettings { surface_points: 0, ..Default::default() };
        assert!(run_rate_vs_return(&ScenarioConfig::default_mortgage(), &settings).is_err());
    }
}
