//! Servicing fee policy
//!
//! The servicing fee (MER) is quoted as an annual rate and accrued daily:
//! `daily_rate = annual_rate / day_count`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Default annual servicing fee rate (6%)
pub const DEFAULT_ANNUAL_RATE: Decimal = dec!(0.06);

/// Default day count used to derive the daily rate
pub const DEFAULT_DAY_COUNT: u32 = 365;

/// How the servicing fee is accrued across a fund's ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Annual fee rate as a decimal (0.06 = 6%)
    pub annual_rate: Decimal,
    /// Days per year the annual rate is spread over
    pub day_count: u32,
    /// Whether the seed row accrues a fee
    pub charge_fee_on_seed_day: bool,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            annual_rate: DEFAULT_ANNUAL_RATE,
            day_count: DEFAULT_DAY_COUNT,
            charge_fee_on_seed_day: false,
        }
    }
}

impl FeePolicy {
    /// Creates a fee policy
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidFeePolicy` if the rate is negative or the
    /// day count is zero.
    pub fn new(annual_rate: Decimal, day_count: u32) -> Result<Self, NavError> {
        let policy = Self {
            annual_rate,
            day_count,
            charge_fee_on_seed_day: false,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Sets whether the seed row is charged a fee
    pub fn with_seed_day_fee(mut self, charge: bool) -> Self {
        self.charge_fee_on_seed_day = charge;
        self
    }

    /// Checks the policy's parameters
    pub fn validate(&self) -> Result<(), NavError> {
        if self.annual_rate < Decimal::ZERO {
            return Err(NavError::InvalidFeePolicy(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate
            )));
        }
        if self.day_count == 0 {
            return Err(NavError::InvalidFeePolicy("day count must be positive".to_string()));
        }
        Ok(())
    }

    /// Returns the daily fee rate
    pub fn daily_rate(&self) -> Decimal {
        if self.day_count == 0 {
            return Decimal::ZERO;
        }
        self.annual_rate / Decimal::from(self.day_count)
    }
}

/// Computes the day's servicing fee on the post-movement AUM base
///
/// `fee = (close_ppu * post_mov_aum) * daily_rate`
///
/// Returns `None` when the product leaves the decimal range.
pub fn servicing_fee(
    close_ppu: Decimal,
    post_mov_aum: Decimal,
    daily_rate: Decimal,
) -> Option<Decimal> {
    close_ppu.checked_mul(post_mov_aum)?.checked_mul(daily_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_daily_rate() {
        let policy = FeePolicy::default();
        assert_eq!(policy.daily_rate().round_dp(12), dec!(0.000164383562));
        assert!(!policy.charge_fee_on_seed_day);
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert!(matches!(
            FeePolicy::new(dec!(-0.01), 365),
            Err(NavError::InvalidFeePolicy(_))
        ));
    }

    #[test]
    fn test_rejects_zero_day_count() {
        assert!(FeePolicy::new(dec!(0.06), 0).is_err());
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let policy = FeePolicy::new(Decimal::ZERO, 360).unwrap();
        assert_eq!(policy.daily_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_servicing_fee_formula() {
        assert_eq!(servicing_fee(dec!(2), dec!(1000), dec!(0.001)), Some(dec!(2)));
    }

    #[test]
    fn test_servicing_fee_out_of_range() {
        assert_eq!(servicing_fee(Decimal::MAX, dec!(2), dec!(1)), None);
    }
}
