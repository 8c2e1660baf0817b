//! Pre-built Test Fixtures
//!
//! Ready-to-use seeds, funds and fee policies. The seed figures are the
//! first day of the SCENQ ledger, which the worked examples are based on.

use chrono::NaiveDate;
use domain_nav::{FeePolicy, Fund, SeedState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for seed states
pub struct SeedFixtures;

impl SeedFixtures {
    /// First ledger date (Oct 21, 2025)
    pub fn seed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 21).expect("valid fixture date")
    }

    /// Seed AUM used by the reference ledger
    pub fn seed_aum() -> Decimal {
        dec!(10733.50)
    }

    /// Seed priced at exactly 1.00000 per unit
    pub fn reference() -> SeedState {
        SeedState::at_par(Self::seed_date(), Self::seed_aum()).expect("valid fixture seed")
    }

    /// Seed priced at 2.00000 per unit
    pub fn priced_at_two() -> SeedState {
        SeedState::new(Self::seed_date(), dec!(20000), dec!(10000)).expect("valid fixture seed")
    }

    /// Returns the date `days` after the seed date
    pub fn day(days: u64) -> NaiveDate {
        Self::seed_date() + chrono::Days::new(days)
    }
}

/// Fixture for fee policies
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// 6% annual over 365 days, no fee on the seed day
    pub fn standard() -> FeePolicy {
        FeePolicy::default()
    }

    /// Standard rate, also charged on the seed day
    pub fn with_seed_day_fee() -> FeePolicy {
        FeePolicy::default().with_seed_day_fee(true)
    }

    /// No fee at all, so prices move only with performance
    pub fn fee_free() -> FeePolicy {
        FeePolicy::new(Decimal::ZERO, 365).expect("valid fixture policy")
    }

    /// The standard daily rate, 0.06 / 365
    pub fn daily_rate() -> Decimal {
        dec!(0.06) / dec!(365)
    }
}

/// Fixture for funds
pub struct FundFixtures;

impl FundFixtures {
    pub fn scenq() -> Fund {
        Fund::new("SCENQ", "TQQQ")
    }

    pub fn scenb() -> Fund {
        Fund::new("SCENB", "BITU")
    }
}
