//! Fixed scenario parameters shared by every grid point

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::finance::DEFAULT_CAPITAL_GAIN_TAX_RATE;

/// Errors raised while building or loading a [`ScenarioConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("months_pre_mortgage must be positive")]
    NoMonthsPreMortgage,
    #[error("loan_needed must be a positive amount, got {0}")]
    InvalidLoan(f64),
    #[error("capital_gain_tax_rate must be in [0, 1), got {0}")]
    InvalidTaxRate(f64),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable description of the purchase being financed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Months of contributions before the down payment is due
    pub months_pre_mortgage: u32,

    /// Liquidity needed at the mortgage date (currency)
    pub loan_needed: f64,

    /// Statutory capital-gains tax rate
    #[serde(default = "default_tax_rate")]
    pub capital_gain_tax_rate: f64,
}

fn default_tax_rate() -> f64 { DEFAULT_CAPITAL_GAIN_TAX_RATE }

impl ScenarioConfig {
    /// Build a validated config
    pub fn new(
        months_pre_mortgage: u32,
        loan_needed: f64,
        capital_gain_tax_rate: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            months_pre_mortgage,
            loan_needed,
            capital_gain_tax_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Ten years of contributions before a 64,650 down payment, 26% tax
    pub fn default_mortgage() -> Self {
        Self {
            months_pre_mortgage: 120,
            loan_needed: 64_650.0,
            capital_gain_tax_rate: DEFAULT_CAPITAL_GAIN_TAX_RATE,
        }
    }

    /// Check the invariants that `new` enforces (useful after deserialising)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.months_pre_mortgage == 0 {
            return Err(ConfigError::NoMonthsPreMortgage);
        }
        if !(self.loan_needed.is_finite() && self.loan_needed > 0.0) {
            return Err(ConfigError::InvalidLoan(self.loan_needed));
        }
        let tax = self.capital_gain_tax_rate;
        if !(tax.is_finite() && (0.0..1.0).contains(&tax)) {
            return Err(ConfigError::InvalidTaxRate(tax));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::default_mortgage()
    }
}
