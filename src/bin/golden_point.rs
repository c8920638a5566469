//! Print the reference scenario used as a regression value
//!
//! 120 months of 1,000/month at 6.5%, 64,650 needed, 4.5% loan, 26% tax.
//! Pass --json for machine-readable output.

use fido_liquidation::scenario::{evaluate_point_detailed, GridPoint, PointOutcome, ScenarioConfig};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let config = ScenarioConfig::default_mortgage();
    let point = GridPoint::new(0.045, 0.065, 1000.0);

    let outcome = evaluate_point_detailed(point, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        PointOutcome::Evaluated(eval) => {
            println!("Capital at mortgage: {:.17}", eval.capital_at_mortgage);
            println!("Months to repay:     {:.17}", eval.months_to_repay);
            println!("Loan wealth:         {:.17}", eval.leverage_wealth);
            println!("Liquidation wealth:  {:.17}", eval.liquidation.total);
            println!("Difference:          {:.17}", eval.difference);
        }
        PointOutcome::NonViable { reason, .. } => {
            anyhow::bail!("reference scenario is not viable: {}", reason);
        }
    }
    Ok(())
}
