//! Loan amortization timing (closed-form NPER)

/// Number of months needed to repay `loan_amount` with a level `monthly_payment`
/// at a nominal `annual_rate` (compounded monthly at `annual_rate / 12`).
///
/// # Returns
/// * `0.0` for a degenerate loan (non-positive amount or payment)
/// * `loan_amount / monthly_payment` when the rate is zero or negative
/// * `f64::INFINITY` when the payment never covers the accruing interest
///
/// The result is fractional; callers compound over the exact horizon.
pub fn loan_repayment_months(loan_amount: f64, monthly_payment: f64, annual_rate: f64) -> f64 {
    if monthly_payment <= 0.0 || loan_amount <= 0.0 {
        return 0.0;
    }

    if annual_rate <= 0.0 {
        return loan_amount / monthly_payment;
    }

    let monthly_rate = annual_rate / 12.0;

    // Non-positive argument means interest outruns the payment
    let argument = 1.0 - loan_amount * monthly_rate / monthly_payment;
    if argument <= 0.0 {
        return f64::INFINITY;
    }

    -argument.ln() / (1.0 + monthly_rate).ln()
}
