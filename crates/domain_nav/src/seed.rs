//! Seed state and the first ledger row
//!
//! The seed is the fund right after its first subscription. Its AUM is not
//! re-entered as a flow: the seed row runs the day-step with no deposits or
//! withdrawals, using only the seed day's own performance, costs and fee.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::NavError;
use crate::fee::FeePolicy;
use crate::input::DailyInput;
use crate::row::{ClosingState, LedgerRow};
use crate::step::{compute_row, FeeCharge};

/// A fund's starting point, supplied once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedState {
    /// First ledger day
    pub date: NaiveDate,
    /// AUM right after the first subscription
    pub aum: Decimal,
    /// Units issued against the seed AUM
    pub units: Decimal,
}

impl SeedState {
    /// Creates a validated seed
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidSeed` if `units` is not positive or `aum`
    /// is negative.
    pub fn new(date: NaiveDate, aum: Decimal, units: Decimal) -> Result<Self, NavError> {
        let seed = Self { date, aum, units };
        seed.validate()?;
        Ok(seed)
    }

    /// Creates a seed priced at exactly 1.0 per unit
    pub fn at_par(date: NaiveDate, aum: Decimal) -> Result<Self, NavError> {
        Self::new(date, aum, aum)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if self.units <= Decimal::ZERO {
            return Err(NavError::invalid_seed(
                self.date,
                format!("seed units must be positive, got {}", self.units),
            ));
        }
        if self.aum < Decimal::ZERO {
            return Err(NavError::invalid_seed(
                self.date,
                format!("seed AUM must not be negative, got {}", self.aum),
            ));
        }
        if self.aum.checked_div(self.units).is_none() {
            return Err(NavError::invalid_seed(
                self.date,
                format!("seed price per unit is out of range: {} / {}", self.aum, self.units),
            ));
        }
        Ok(())
    }

    /// Seed AUM divided by seed units
    pub fn initial_ppu(&self) -> Decimal {
        self.aum.checked_div(self.units).unwrap_or(Decimal::ZERO)
    }

    /// The seed expressed as a closing state, the "prior" of the seed row
    pub fn as_closing(&self) -> ClosingState {
        ClosingState::new(self.aum, self.units, self.initial_ppu())
    }
}

/// Produces the first ledger row directly from the seed
///
/// # Arguments
///
/// * `seed` - The fund's seed state
/// * `seed_day` - The input record dated on the seed date, if any; only its
///   performance, cost and fee override fields are used
/// * `policy` - Fee policy; `charge_fee_on_seed_day` decides whether the
///   computed fee accrues on this row. A manual fee override is always used.
///
/// # Errors
///
/// Returns `NavError::InvalidSeed` for an invalid seed, or the input's
/// validation error.
pub fn initialize_seed(
    seed: &SeedState,
    seed_day: Option<&DailyInput>,
    policy: &FeePolicy,
) -> Result<LedgerRow, NavError> {
    seed.validate()?;

    let mut input = match seed_day {
        Some(day) if day.date != seed.date => {
            return Err(NavError::invalid_seed(
                seed.date,
                format!("seed day record is dated {}", day.date),
            ));
        }
        Some(day) => day.clone(),
        None => DailyInput::new(seed.date),
    };

    if input.has_flows() {
        warn!(
            date = %seed.date,
            deposits = %input.deposits,
            withdrawals = %input.withdrawals,
            "Ignoring flows on the seed day; the seed AUM already includes them"
        );
        input.deposits = Decimal::ZERO;
        input.withdrawals = Decimal::ZERO;
    }

    let fee = if policy.charge_fee_on_seed_day {
        FeeCharge::Accrue(policy.daily_rate())
    } else {
        FeeCharge::Waive
    };

    compute_row(&seed.as_closing(), &input, fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 21).unwrap()
    }

    #[test]
    fn test_seed_row_at_par() {
        let seed = SeedState::at_par(seed_date(), dec!(10733.50)).unwrap();
        let row = initialize_seed(&seed, None, &FeePolicy::default()).unwrap();

        assert_eq!(row.initial_ppu, dec!(1));
        assert_eq!(row.price_with_mer, dec!(1));
        assert_eq!(row.final_aum, dec!(10733.50));
        assert_eq!(row.servicing_fee, Decimal::ZERO);
    }

    #[test]
    fn test_zero_units_is_invalid_seed() {
        let result = SeedState::new(seed_date(), dec!(100), Decimal::ZERO);
        assert!(matches!(result, Err(NavError::InvalidSeed { .. })));
    }

    #[test]
    fn test_out_of_range_price_is_invalid_seed() {
        let result = SeedState::new(seed_date(), Decimal::MAX, dec!(0.5));
        assert!(matches!(result, Err(NavError::InvalidSeed { .. })));
    }

    #[test]
    fn test_seed_day_fee_charged_when_enabled() {
        let seed = SeedState::at_par(seed_date(), dec!(1000)).unwrap();
        let policy = FeePolicy::default().with_seed_day_fee(true);
        let row = initialize_seed(&seed, None, &policy).unwrap();

        assert!(row.servicing_fee > Decimal::ZERO);
        assert!(row.price_with_mer < dec!(1));
    }

    #[test]
    fn test_seed_day_flows_are_ignored() {
        let seed = SeedState::at_par(seed_date(), dec!(1000)).unwrap();
        let day = DailyInput::new(seed_date()).with_deposits(dec!(500));
        let row = initialize_seed(&seed, Some(&day), &FeePolicy::default()).unwrap();

        assert_eq!(row.deposits, Decimal::ZERO);
        assert_eq!(row.units_end, dec!(1000));
    }
}
