//! Compound growth of a lump sum and of a monthly contribution plan

/// Monthly growth factor equivalent to an effective `annual_rate`
///
/// Formula: (1 + annual_rate)^(1/12)
pub fn monthly_growth_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0)
}

/// Future value of `principal` compounded at `annual_rate` for `months`.
///
/// Returns the principal unchanged when there is nothing to grow
/// (`months <= 0` or `principal <= 0`).
pub fn lump_sum_future_value(principal: f64, annual_rate: f64, months: f64) -> f64 {
    if months <= 0.0 || principal <= 0.0 {
        return principal;
    }
    principal * monthly_growth_factor(annual_rate).powf(months)
}

/// Future value of an annuity-due: `monthly_contribution` paid at the start of
/// each of `months` periods, growing at the monthly equivalent of `annual_return`.
///
/// Formula: c * (g^(n+1) - g) / (g - 1), or c * n when g == 1
pub fn annuity_future_value(monthly_contribution: f64, annual_return: f64, months: f64) -> f64 {
    if months <= 0.0 || monthly_contribution <= 0.0 {
        return 0.0;
    }

    let g = monthly_growth_factor(annual_return);
    if g == 1.0 {
        return monthly_contribution * months;
    }

    monthly_contribution * ((g.powf(months + 1.0) - g) / (g - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lump_sum_zero_months_is_identity() {
        for &principal in &[0.0, -50.0, 1.0, 167_579.61] {
            for &rate in &[-0.2, 0.0, 0.065, 0.5] {
                assert_eq!(lump_sum_future_value(principal, rate, 0.0), principal);
            }
        }
    }

    #[test]
    fn test_lump_sum_twelve_months_is_annual_rate() {
        let fv = lump_sum_future_value(1000.0, 0.07, 12.0);
        assert_relative_eq!(fv, 1070.0, max_relative = 1e-12);
    }

    #[test]
    fn test_lump_sum_fractional_months() {
        let half = lump_sum_future_value(1000.0, 0.10, 6.0);
        assert_relative_eq!(half, 1000.0 * 1.10_f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_annuity_zero_return_is_linear() {
        for &(c, n) in &[(1000.0, 120.0), (10.0, 12.0), (250.5, 7.0)] {
            assert_eq!(annuity_future_value(c, 0.0, n), c * n);
        }
    }

    #[test]
    fn test_annuity_degenerate_inputs() {
        assert_eq!(annuity_future_value(1000.0, 0.05, 0.0), 0.0);
        assert_eq!(annuity_future_value(0.0, 0.05, 12.0), 0.0);
        assert_eq!(annuity_future_value(-10.0, 0.05, 12.0), 0.0);
    }

    #[test]
    fn test_annuity_due_matches_period_sum() {
        // Each contribution grows for the full period it was made in
        let g = monthly_growth_factor(0.065);
        let expected: f64 = (1..=24).map(|k| 100.0 * g.powi(k)).sum();
        assert_relative_eq!(annuity_future_value(100.0, 0.065, 24.0), expected, max_relative = 1e-10);
    }

    #[test]
    fn test_annuity_reference_value() {
        let capital = annuity_future_value(1000.0, 0.065, 120.0);
        assert_relative_eq!(capital, 167_579.61372446184, max_relative = 1e-12);
    }
}
