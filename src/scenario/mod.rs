//! Scenario engine: loan vs liquidation at a point and over parameter grids

mod config;
mod outcome;
mod engine;
mod grid;
mod sweep;

pub use config::{ConfigError, ScenarioConfig};
pub use outcome::{GridPoint, NonViableReason, PointEvaluation, PointOutcome, WealthDifference};
pub use engine::{evaluate_point, evaluate_point_detailed};
pub use grid::{linspace, meshgrid, Grid};
pub use sweep::{
    sensitivity_lines, sweep, sweep_contribution_vs_rate, sweep_rate_vs_return, AxisRole,
    SensitivityLine, SweepResult, SweepRoles,
};

use crate::finance::FinanceError;
use thiserror::Error;

/// Input-contract violations while evaluating scenarios
///
/// Ordinary "not comparable" points are not errors; they are
/// [`WealthDifference::NonViable`].
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("at {point}: {source}")]
    Finance {
        point: GridPoint,
        #[source]
        source: FinanceError,
    },
    #[error("evaluation at {point} is not a finite number")]
    NonFinite { point: GridPoint },
    #[error("{0} axis has no values")]
    EmptyAxis(AxisRole),
    #[error("both swept axes are bound to {0}")]
    DuplicateRole(AxisRole),
    #[error("result does not fit a {rows} x {cols} grid")]
    ShapeMismatch { rows: usize, cols: usize },
}
