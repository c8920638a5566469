//! Result types for a single scenario evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::finance::LiquidationBreakdown;

/// One combination of the three swept parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Nominal annual loan rate (e.g. 0.045)
    pub interest_rate: f64,
    /// Effective annual portfolio return (e.g. 0.065)
    pub portfolio_return: f64,
    /// Monthly contribution, also used as the loan repayment
    pub monthly_contribution: f64,
}

impl GridPoint {
    pub fn new(interest_rate: f64, portfolio_return: f64, monthly_contribution: f64) -> Self {
        Self { interest_rate, portfolio_return, monthly_contribution }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(i={:.4}%, r={:.4}%, pac={:.2})",
            self.interest_rate * 100.0,
            self.portfolio_return * 100.0,
            self.monthly_contribution
        )
    }
}

/// Why two strategies cannot be compared at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonViableReason {
    /// Contributions did not accumulate enough capital to fund the down payment
    InsufficientCapital { capital: f64, loan_needed: f64 },
    /// The contribution never covers the loan interest
    LoanNeverRepaid,
}

impl fmt::Display for NonViableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonViableReason::InsufficientCapital { capital, loan_needed } => write!(
                f,
                "insufficient capital ({:.2} accumulated, {:.2} needed)",
                capital, loan_needed
            ),
            NonViableReason::LoanNeverRepaid => write!(f, "loan is never repaid"),
        }
    }
}

/// Terminal wealth of the loan strategy minus that of the liquidation strategy
///
/// Positive means borrowing wins, negative means selling wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum WealthDifference {
    Viable(f64),
    NonViable(NonViableReason),
}

impl WealthDifference {
    /// The difference, or `None` when the point is not comparable
    pub fn value(&self) -> Option<f64> {
        match self {
            WealthDifference::Viable(v) => Some(*v),
            WealthDifference::NonViable(_) => None,
        }
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, WealthDifference::Viable(_))
    }

    /// True only for a viable point where the loan strategy ends ahead
    pub fn leverage_wins(&self) -> bool {
        matches!(self, WealthDifference::Viable(v) if *v > 0.0)
    }

    /// Numeric encoding with negative infinity for non-viable points
    pub fn as_sentinel(&self) -> f64 {
        self.value().unwrap_or(f64::NEG_INFINITY)
    }
}

/// Full breakdown of a viable evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointEvaluation {
    pub point: GridPoint,
    /// Portfolio value when the down payment is due
    pub capital_at_mortgage: f64,
    /// Comparison horizon: months until the loan is repaid
    pub months_to_repay: f64,
    /// Strategy A: whole portfolio kept invested over the horizon
    pub leverage_wealth: f64,
    /// Strategy B: partial sale, remainder and contributions invested
    pub liquidation: LiquidationBreakdown,
    /// `leverage_wealth - liquidation.total`
    pub difference: f64,
}

/// Outcome of evaluating one grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PointOutcome {
    Evaluated(PointEvaluation),
    NonViable { point: GridPoint, reason: NonViableReason },
}

impl PointOutcome {
    pub fn difference(&self) -> WealthDifference {
        match self {
            PointOutcome::Evaluated(eval) => WealthDifference::Viable(eval.difference),
            PointOutcome::NonViable { reason, .. } => WealthDifference::NonViable(*reason),
        }
    }
}
