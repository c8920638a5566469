//! Loan vs liquidation - wealth comparison for funding a down payment from a portfolio
//!
//! This library provides:
//! - Closed-form loan timing, lump-sum growth and annuity-due growth
//! - Terminal wealth of selling part of the portfolio (with capital-gains tax)
//! - Point evaluation of borrowing against the portfolio vs liquidating it
//! - Two-parameter sweeps of the wealth difference for break-even surfaces
//! - Standard analyses and static CSV/JSON exports for plotting

pub mod finance;
pub mod scenario;
pub mod analysis;
pub mod export;

// Re-export commonly used types
pub use finance::{
    annuity_future_value, liquidation_future_value, loan_repayment_months, lump_sum_future_value,
    FinanceError,
};
pub use scenario::{
    evaluate_point, evaluate_point_detailed, sweep, AxisRole, GridPoint, ScenarioConfig,
    ScenarioError, SweepResult, SweepRoles, WealthDifference,
};
pub use analysis::{AnalysisKind, AnalysisSettings, AnalysisView};
