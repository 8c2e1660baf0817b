//! CLI configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_nav::{FeePolicy, NavError, DEFAULT_ANNUAL_RATE, DEFAULT_DAY_COUNT};

use crate::error::CliError;

/// Configuration read from `NAV_*` environment variables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Annual servicing fee rate as a decimal (0.06 = 6%)
    pub annual_fee_rate: Decimal,
    /// Days per year the annual rate is spread over
    pub day_count: u32,
    /// Whether the seed row is charged a fee
    pub charge_fee_on_seed_day: bool,
    /// Log level
    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            annual_fee_rate: DEFAULT_ANNUAL_RATE,
            day_count: DEFAULT_DAY_COUNT,
            charge_fee_on_seed_day: false,
            log_level: "info".to_string(),
        }
    }
}

impl NavConfig {
    /// Loads configuration from environment
    ///
    /// Variables that are not set keep their default values.
    pub fn from_env() -> Result<Self, CliError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("NAV"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Returns the validated fee policy
    pub fn fee_policy(&self) -> Result<FeePolicy, NavError> {
        Ok(FeePolicy::new(self.annual_fee_rate, self.day_count)?
            .with_seed_day_fee(self.charge_fee_on_seed_day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_matches_engine_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.fee_policy().unwrap(), FeePolicy::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_seed_day_flag_carried_into_policy() {
        let config = NavConfig {
            charge_fee_on_seed_day: true,
            day_count: 360,
            ..NavConfig::default()
        };
        let policy = config.fee_policy().unwrap();

        assert!(policy.charge_fee_on_seed_day);
        assert_eq!(policy.daily_rate(), dec!(0.06) / dec!(360));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let config = NavConfig {
            annual_fee_rate: dec!(-0.02),
            ..NavConfig::default()
        };
        assert!(matches!(config.fee_policy(), Err(NavError::InvalidFeePolicy(_))));
    }
}
