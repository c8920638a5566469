//! Single-point comparison of the loan and liquidation strategies

use crate::finance::{
    annuity_future_value, liquidation_breakdown, loan_repayment_months, lump_sum_future_value,
};
use super::config::ScenarioConfig;
use super::outcome::{GridPoint, NonViableReason, PointEvaluation, PointOutcome, WealthDifference};
use super::ScenarioError;

/// Evaluate both strategies at one point and keep every intermediate value.
///
/// Steps:
/// 1. Capital accumulated by the mortgage date (annuity-due over `months_pre_mortgage`)
/// 2. Months to repay `loan_needed` with the contribution as the installment
/// 3. Strategy A: the whole capital compounds over that horizon
/// 4. Strategy B: sell enough to net `loan_needed` after tax, keep contributing
pub fn evaluate_point_detailed(
    point: GridPoint,
    config: &ScenarioConfig,
) -> Result<PointOutcome, ScenarioError> {
    let capital_at_mortgage = annuity_future_value(
        point.monthly_contribution,
        point.portfolio_return,
        config.months_pre_mortgage as f64,
    );
    if capital_at_mortgage.is_nan() {
        return Err(ScenarioError::NonFinite { point });
    }

    if capital_at_mortgage < config.loan_needed {
        return Ok(PointOutcome::NonViable {
            point,
            reason: NonViableReason::InsufficientCapital {
                capital: capital_at_mortgage,
                loan_needed: config.loan_needed,
            },
        });
    }

    let months_to_repay = loan_repayment_months(
        config.loan_needed,
        point.monthly_contribution,
        point.interest_rate,
    );
    if months_to_repay.is_nan() {
        return Err(ScenarioError::NonFinite { point });
    }
    if months_to_repay.is_infinite() {
        return Ok(PointOutcome::NonViable {
            point,
            reason: NonViableReason::LoanNeverRepaid,
        });
    }

    let leverage_wealth =
        lump_sum_future_value(capital_at_mortgage, point.portfolio_return, months_to_repay);

    let liquidation = liquidation_breakdown(
        config.loan_needed,
        point.portfolio_return,
        months_to_repay,
        point.monthly_contribution,
        config.months_pre_mortgage,
        capital_at_mortgage,
        config.capital_gain_tax_rate,
    )
    .map_err(|source| ScenarioError::Finance { point, source })?;

    let difference = leverage_wealth - liquidation.total;
    if !difference.is_finite() {
        return Err(ScenarioError::NonFinite { point });
    }

    Ok(PointOutcome::Evaluated(PointEvaluation {
        point,
        capital_at_mortgage,
        months_to_repay,
        leverage_wealth,
        liquidation,
        difference,
    }))
}

/// Wealth difference (loan minus liquidation) for one parameter triple
pub fn evaluate_point(
    interest_rate: f64,
    portfolio_return: f64,
    monthly_contribution: f64,
    config: &ScenarioConfig,
) -> Result<WealthDifference, ScenarioError> {
    let point = GridPoint::new(interest_rate, portfolio_return, monthly_contribution);
    evaluate_point_detailed(point, config).map(|outcome| outcome.difference())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const GOLDEN_DIFFERENCE: f64 = 12_097.52504273766;

    fn config() -> ScenarioConfig {
        ScenarioConfig::default_mortgage()
    }

    #[test]
    fn test_golden_scenario() {
        let diff = evaluate_point(0.045, 0.065, 1000.0, &config()).unwrap();
        let value = diff.value().expect("golden scenario should be viable");
        assert_abs_diff_eq!(value, GOLDEN_DIFFERENCE, epsilon = 1e-6);

        // Same inputs, same bits
        let again = evaluate_point(0.045, 0.065, 1000.0, &config()).unwrap();
        assert_eq!(diff, again);
    }

    #[test]
    fn test_golden_breakdown() {
        let outcome = evaluate_point_detailed(GridPoint::new(0.045, 0.065, 1000.0), &config()).unwrap();
        let eval = match outcome {
            PointOutcome::Evaluated(eval) => eval,
            other => panic!("expected viable outcome, got {:?}", other),
        };
        assert_relative_eq!(eval.capital_at_mortgage, 167_579.61372446184, max_relative = 1e-12);
        assert_relative_eq!(eval.months_to_repay, 74.17853448233221, max_relative = 1e-12);
        assert_relative_eq!(eval.leverage_wealth, 247_334.10392315398, max_relative = 1e-10);
        assert_relative_eq!(eval.liquidation.total, 235_236.57888041632, max_relative = 1e-10);
        assert_eq!(eval.difference, eval.leverage_wealth - eval.liquidation.total);
    }

    #[test]
    fn test_insufficient_capital_is_non_viable() {
        let small = ScenarioConfig::new(12, 1_000_000.0, 0.26).unwrap();
        let diff = evaluate_point(0.045, 0.065, 10.0, &small).unwrap();
        assert!(matches!(
            diff,
            WealthDifference::NonViable(NonViableReason::InsufficientCapital { .. })
        ));
        assert_eq!(diff.as_sentinel(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_unpayable_loan_is_non_viable() {
        // 20% on 64,650 accrues ~1,077/month, more than the 1,000 contribution
        let diff = evaluate_point(0.20, 0.065, 1000.0, &config()).unwrap();
        assert_eq!(diff, WealthDifference::NonViable(NonViableReason::LoanNeverRepaid));
    }

    #[test]
    fn test_difference_decreases_with_loan_rate() {
        let rates = [0.01, 0.03, 0.045, 0.06, 0.10];
        let diffs: Vec<f64> = rates
            .iter()
            .map(|&i| evaluate_point(i, 0.065, 1000.0, &config()).unwrap().value().unwrap())
            .collect();
        for pair in diffs.windows(2) {
            assert!(pair[1] <= pair[0], "difference should not grow with the loan rate: {:?}", diffs);
        }
        // Expensive enough debt flips the comparison
        assert!(diffs[0] > 0.0);
        assert!(*diffs.last().unwrap() < 0.0);
    }

    #[test]
    fn test_rates_past_divergence_are_non_viable() {
        // Loan diverges once i * loan / 12 >= contribution, i.e. i >= ~18.56%
        for &i in &[0.19, 0.25, 0.40] {
            let diff = evaluate_point(i, 0.065, 1000.0, &config()).unwrap();
            assert!(!diff.is_viable());
        }
    }

    #[test]
    fn test_zero_return_favours_liquidation() {
        // No growth to protect, so paying interest cannot win
        let diff = evaluate_point(0.045, 0.0, 1000.0, &config()).unwrap();
        assert_abs_diff_eq!(diff.value().unwrap(), -9_528.534482332208, epsilon = 1e-6);
    }

    #[test]
    fn test_return_below_total_loss_is_an_error() {
        let err = evaluate_point(0.045, -1.5, 1000.0, &config()).unwrap_err();
        assert!(matches!(err, ScenarioError::NonFinite { .. }));
    }
}
