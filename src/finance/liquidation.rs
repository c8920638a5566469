//! Terminal wealth of the liquidation strategy
//!
//! Part of the portfolio is sold to raise the down payment. Capital-gains tax is
//! charged on the share of the withdrawal attributed to growth, approximated as
//! `1 - contributions / capital`. This is a proxy for cost basis, not a lot-level
//! tax calculation.

use serde::Serialize;

use super::growth::{annuity_future_value, lump_sum_future_value};
use super::FinanceError;

/// Italian capital-gains rate on financial income
pub const DEFAULT_CAPITAL_GAIN_TAX_RATE: f64 = 0.26;

/// Intermediate quantities of a liquidation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiquidationBreakdown {
    /// Share of capital attributed to growth rather than contributions
    pub ratio_gain: f64,
    /// Tax rate actually paid on the gross withdrawal
    pub effective_tax_rate: f64,
    /// Gross amount sold so that `loan_needed` is left after tax
    pub gross_withdrawal: f64,
    /// Capital left invested right after the sale
    pub capital_after_liquidation: f64,
    /// Remaining capital compounded over the horizon
    pub lump_sum_value: f64,
    /// Contributions continued over the horizon
    pub annuity_value: f64,
    /// Terminal wealth (lump sum + annuity)
    pub total: f64,
}

/// Break down the liquidation strategy over a `loan_months` horizon.
///
/// # Arguments
/// * `loan_needed` - Net amount required after tax
/// * `annual_rate` - Effective annual portfolio return
/// * `loan_months` - Horizon the remaining capital keeps compounding for
/// * `monthly_contribution` - Contribution paid before and after the sale
/// * `months_pre_mortgage` - Months of contributions before the sale
/// * `capital_pre_loan` - Portfolio value at the sale date
/// * `capital_gain_tax_rate` - Statutory rate on realised gains
pub fn liquidation_breakdown(
    loan_needed: f64,
    annual_rate: f64,
    loan_months: f64,
    monthly_contribution: f64,
    months_pre_mortgage: u32,
    capital_pre_loan: f64,
    capital_gain_tax_rate: f64,
) -> Result<LiquidationBreakdown, FinanceError> {
    if !(capital_pre_loan > 0.0) {
        return Err(FinanceError::NonPositiveCapital(capital_pre_loan));
    }

    let contributed = months_pre_mortgage as f64 * monthly_contribution;
    let ratio_gain = 1.0 - contributed / capital_pre_loan;
    let effective_tax_rate = ratio_gain * capital_gain_tax_rate;
    if effective_tax_rate >= 1.0 {
        return Err(FinanceError::TaxRateAtOrAboveOne(effective_tax_rate));
    }

    let gross_withdrawal = loan_needed / (1.0 - effective_tax_rate);
    let capital_after_liquidation = capital_pre_loan - gross_withdrawal;

    let lump_sum_value = lump_sum_future_value(capital_after_liquidation, annual_rate, loan_months);
    let annuity_value = annuity_future_value(monthly_contribution, annual_rate, loan_months);

    Ok(LiquidationBreakdown {
        ratio_gain,
        effective_tax_rate,
        gross_withdrawal,
        capital_after_liquidation,
        lump_sum_value,
        annuity_value,
        total: lump_sum_value + annuity_value,
    })
}

/// Terminal wealth of the liquidation strategy; see [`liquidation_breakdown`].
pub fn liquidation_future_value(
    loan_needed: f64,
    annual_rate: f64,
    loan_months: f64,
    monthly_contribution: f64,
    months_pre_mortgage: u32,
    capital_pre_loan: f64,
    capital_gain_tax_rate: f64,
) -> Result<f64, FinanceError> {
    liquidation_breakdown(
        loan_needed,
        annual_rate,
        loan_months,
        monthly_contribution,
        months_pre_mortgage,
        capital_pre_loan,
        capital_gain_tax_rate,
    )
    .map(|b| b.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_gain_means_no_tax() {
        // Capital equals contributions: nothing to tax
        let b = liquidation_breakdown(10_000.0, 0.0, 12.0, 500.0, 40, 20_000.0, 0.26).unwrap();
        assert_eq!(b.ratio_gain, 0.0);
        assert_eq!(b.effective_tax_rate, 0.0);
        assert_eq!(b.gross_withdrawal, 10_000.0);
        assert_eq!(b.capital_after_liquidation, 10_000.0);
        // Zero return: lump sum unchanged, annuity linear
        assert_eq!(b.total, 10_000.0 + 500.0 * 12.0);
    }

    #[test]
    fn test_gross_up_for_tax() {
        // Half the capital is gain, 26% on that half = 13% effective
        let b = liquidation_breakdown(8_700.0, 0.05, 0.0, 100.0, 100, 20_000.0, 0.26).unwrap();
        assert_relative_eq!(b.ratio_gain, 0.5);
        assert_relative_eq!(b.effective_tax_rate, 0.13);
        assert_relative_eq!(b.gross_withdrawal, 10_000.0, max_relative = 1e-12);
        // Zero horizon: remaining capital only, no further contributions
        assert_relative_eq!(b.total, 10_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_future_value_is_breakdown_total() {
        let b = liquidation_breakdown(64650.0, 0.065, 74.0, 1000.0, 120, 167_579.6, 0.26).unwrap();
        let fv = liquidation_future_value(64650.0, 0.065, 74.0, 1000.0, 120, 167_579.6, 0.26).unwrap();
        assert_eq!(fv, b.total);
        assert_eq!(b.total, b.lump_sum_value + b.annuity_value);
    }

    #[test]
    fn test_rejects_non_positive_capital() {
        let err = liquidation_future_value(1000.0, 0.05, 12.0, 100.0, 12, 0.0, 0.26).unwrap_err();
        assert_eq!(err, FinanceError::NonPositiveCapital(0.0));
        assert!(liquidation_future_value(1000.0, 0.05, 12.0, 100.0, 12, -1.0, 0.26).is_err());
        assert!(liquidation_future_value(1000.0, 0.05, 12.0, 100.0, 12, f64::NAN, 0.26).is_err());
    }

    #[test]
    fn test_rejects_confiscatory_tax() {
        // No contributions, all capital is gain, 100% tax
        let err = liquidation_future_value(1000.0, 0.05, 12.0, 0.0, 12, 5000.0, 1.0).unwrap_err();
        assert!(matches!(err, FinanceError::TaxRateAtOrAboveOne(_)));
    }
}
