//! Closed-form financial primitives
//!
//! Two compounding conventions live side by side here and must stay separate:
//! - Loan amortization uses the nominal monthly rate `annual_rate / 12`
//! - Portfolio growth uses the monthly equivalent of an effective annual
//!   return, `(1 + annual_rate)^(1/12)`

mod loan;
mod growth;
mod liquidation;

pub use loan::loan_repayment_months;
pub use growth::{monthly_growth_factor, lump_sum_future_value, annuity_future_value};
pub use liquidation::{
    liquidation_breakdown, liquidation_future_value, LiquidationBreakdown,
    DEFAULT_CAPITAL_GAIN_TAX_RATE,
};

use thiserror::Error;

/// Violations of the input contract of the financial primitives
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinanceError {
    #[error("capital before the loan must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("effective tax rate {0} leaves nothing to withdraw (must be below 1)")]
    TaxRateAtOrAboveOne(f64),
}
