//! Two-parameter sweeps over the wealth difference
//!
//! Cells are independent, so they are evaluated with rayon and written back in
//! row-major order; the result does not depend on scheduling.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

use super::config::ScenarioConfig;
use super::engine::evaluate_point;
use super::grid::{meshgrid, Grid};
use super::outcome::{GridPoint, WealthDifference};
use super::ScenarioError;

/// Which parameter an axis drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRole {
    InterestRate,
    PortfolioReturn,
    MonthlyContribution,
}

impl AxisRole {
    pub const ALL: [AxisRole; 3] = [
        AxisRole::InterestRate,
        AxisRole::PortfolioReturn,
        AxisRole::MonthlyContribution,
    ];

    /// True for the two annual-rate parameters
    pub fn is_rate(&self) -> bool {
        !matches!(self, AxisRole::MonthlyContribution)
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisRole::InterestRate => "interest rate",
            AxisRole::PortfolioReturn => "portfolio return",
            AxisRole::MonthlyContribution => "monthly contribution",
        };
        f.write_str(name)
    }
}

/// Roles bound to the first (columns) and second (rows) swept axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepRoles {
    pub axis1: AxisRole,
    pub axis2: AxisRole,
}

impl SweepRoles {
    /// Loan rate along columns, portfolio return along rows
    pub const RATE_VS_RETURN: SweepRoles = SweepRoles {
        axis1: AxisRole::InterestRate,
        axis2: AxisRole::PortfolioReturn,
    };

    /// Contribution along columns, loan rate along rows
    pub const CONTRIBUTION_VS_RATE: SweepRoles = SweepRoles {
        axis1: AxisRole::MonthlyContribution,
        axis2: AxisRole::InterestRate,
    };

    /// The role held fixed, or an error if both axes share a role
    pub fn fixed_role(&self) -> Result<AxisRole, ScenarioError> {
        if self.axis1 == self.axis2 {
            return Err(ScenarioError::DuplicateRole(self.axis1));
        }
        let fixed = AxisRole::ALL
            .into_iter()
            .find(|role| *role != self.axis1 && *role != self.axis2);
        // Three roles, two distinct ones taken: exactly one is left
        fixed.ok_or(ScenarioError::DuplicateRole(self.axis1))
    }

    fn bind(&self, fixed: AxisRole, v1: f64, v2: f64, fixed_value: f64) -> GridPoint {
        let mut point = GridPoint::new(0.0, 0.0, 0.0);
        for (role, value) in [(self.axis1, v1), (self.axis2, v2), (fixed, fixed_value)] {
            match role {
                AxisRole::InterestRate => point.interest_rate = value,
                AxisRole::PortfolioReturn => point.portfolio_return = value,
                AxisRole::MonthlyContribution => point.monthly_contribution = value,
            }
        }
        point
    }
}

/// Coordinate grids and the wealth difference at every cell, all of shape
/// `axis2.len() x axis1.len()`
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub roles: SweepRoles,
    pub fixed_role: AxisRole,
    pub fixed_value: f64,
    pub grid1: Grid<f64>,
    pub grid2: Grid<f64>,
    pub values: Grid<WealthDifference>,
}

impl SweepResult {
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Number of comparable cells
    pub fn viable_count(&self) -> usize {
        self.values.iter().filter(|d| d.is_viable()).count()
    }

    /// Largest |difference| over viable cells
    pub fn max_abs_difference(&self) -> Option<f64> {
        self.values
            .iter()
            .filter_map(|d| d.value())
            .map(f64::abs)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// Evaluate the wealth difference over the Cartesian product of two axes,
/// holding the third parameter at `fixed_value`.
pub fn sweep(
    config: &ScenarioConfig,
    axis1: &[f64],
    axis2: &[f64],
    fixed_value: f64,
    roles: SweepRoles,
) -> Result<SweepResult, ScenarioError> {
    let fixed_role = roles.fixed_role()?;
    if axis1.is_empty() {
        return Err(ScenarioError::EmptyAxis(roles.axis1));
    }
    if axis2.is_empty() {
        return Err(ScenarioError::EmptyAxis(roles.axis2));
    }

    let (grid1, grid2) = meshgrid(axis1, axis2);
    let (rows, cols) = grid1.shape();
    log::debug!(
        "Sweeping {} x {} ({} cells), {} fixed at {}",
        roles.axis1, roles.axis2, rows * cols, fixed_role, fixed_value
    );

    let cells: Vec<WealthDifference> = (0..rows * cols)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / cols, idx % cols);
            let point = roles.bind(fixed_role, axis1[col], axis2[row], fixed_value);
            evaluate_point(
                point.interest_rate,
                point.portfolio_return,
                point.monthly_contribution,
                config,
            )
        })
        .collect::<Result<Vec<_>, ScenarioError>>()?;

    let values = Grid::from_vec(rows, cols, cells)
        .ok_or(ScenarioError::ShapeMismatch { rows, cols })?;

    Ok(SweepResult {
        roles,
        fixed_role,
        fixed_value,
        grid1,
        grid2,
        values,
    })
}

/// Loan rate (columns) against portfolio return (rows) at a fixed contribution
pub fn sweep_rate_vs_return(
    config: &ScenarioConfig,
    rates: &[f64],
    returns: &[f64],
    fixed_contribution: f64,
) -> Result<SweepResult, ScenarioError> {
    sweep(config, rates, returns, fixed_contribution, SweepRoles::RATE_VS_RETURN)
}

/// Contribution (columns) against loan rate (rows) at a fixed portfolio return
pub fn sweep_contribution_vs_rate(
    config: &ScenarioConfig,
    contributions: &[f64],
    rates: &[f64],
    fixed_return: f64,
) -> Result<SweepResult, ScenarioError> {
    sweep(config, contributions, rates, fixed_return, SweepRoles::CONTRIBUTION_VS_RATE)
}

/// Wealth difference along the return axis at one fixed loan rate
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityLine {
    pub interest_rate: f64,
    /// e.g. "i = 4.50%"
    pub label: String,
    pub values: Vec<WealthDifference>,
}

/// One line over `returns` per rate in `fixed_rates`, at a fixed contribution
pub fn sensitivity_lines(
    config: &ScenarioConfig,
    fixed_rates: &[f64],
    returns: &[f64],
    contribution: f64,
) -> Result<Vec<SensitivityLine>, ScenarioError> {
    if returns.is_empty() {
        return Err(ScenarioError::EmptyAxis(AxisRole::PortfolioReturn));
    }

    fixed_rates
        .par_iter()
        .map(|&rate| -> Result<SensitivityLine, ScenarioError> {
            let values = returns
                .iter()
                .map(|&ret| evaluate_point(rate, ret, contribution, config))
                .collect::<Result<Vec<_>, ScenarioError>>()?;
            Ok(SensitivityLine {
                interest_rate: rate,
                label: format!("i = {:.2}%", rate * 100.0),
                values,
            })
        })
        .collect()
}
