//! Tests for loading `NAV_*` configuration from the environment
//!
//! Kept in their own test binary so the environment they set is not shared
//! with the request tests.

use rust_decimal_macros::dec;

use domain_nav::FeePolicy;
use interface_cli::{CliError, NavConfig};

const VARS: [&str; 4] = [
    "NAV_ANNUAL_FEE_RATE",
    "NAV_DAY_COUNT",
    "NAV_CHARGE_FEE_ON_SEED_DAY",
    "NAV_LOG_LEVEL",
];

fn clear_vars() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

// Both cases run in one test: the process environment is shared between
// the threads of a test binary.
#[test]
fn test_from_env_reads_overrides_and_defaults() {
    clear_vars();
    let config = NavConfig::from_env().unwrap();
    assert_eq!(config, NavConfig::default());
    assert_eq!(config.fee_policy().unwrap(), FeePolicy::default());

    std::env::set_var("NAV_ANNUAL_FEE_RATE", "0.05");
    std::env::set_var("NAV_DAY_COUNT", "360");
    std::env::set_var("NAV_CHARGE_FEE_ON_SEED_DAY", "true");
    std::env::set_var("NAV_LOG_LEVEL", "debug");
    let config = NavConfig::from_env().unwrap();

    assert_eq!(config.annual_fee_rate, dec!(0.05));
    assert_eq!(config.day_count, 360);
    assert!(config.charge_fee_on_seed_day);
    assert_eq!(config.log_level, "debug");

    let policy = config.fee_policy().unwrap();
    assert_eq!(policy.daily_rate(), dec!(0.05) / dec!(360));
    assert!(policy.charge_fee_on_seed_day);

    std::env::set_var("NAV_DAY_COUNT", "a year");
    let result = NavConfig::from_env();
    clear_vars();

    assert!(matches!(result, Err(CliError::Config(_))));
}
