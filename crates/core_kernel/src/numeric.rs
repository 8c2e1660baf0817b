//! Decimal precision and input parsing helpers
//!
//! All ledger arithmetic is carried out on `rust_decimal::Decimal` with no
//! intermediate rounding. Rounding is only applied when a value is presented
//! or persisted; price-per-unit needs at least 6 fractional digits so that
//! long histories do not accumulate drift.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::CoreError;

/// Fractional digits kept for prices per unit
pub const PRICE_PRECISION: u32 = 6;

/// Fractional digits kept for unit counts
pub const UNIT_PRECISION: u32 = 6;

/// Fractional digits kept for monetary amounts
pub const CURRENCY_PRECISION: u32 = 2;

/// Fractional digits kept for percentages
pub const PERCENT_PRECISION: u32 = 4;

/// Date format accepted at the input boundary
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounds a price per unit to [`PRICE_PRECISION`]
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp(PRICE_PRECISION)
}

/// Rounds a unit count to [`UNIT_PRECISION`]
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp(UNIT_PRECISION)
}

/// Rounds a monetary amount to [`CURRENCY_PRECISION`]
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp(CURRENCY_PRECISION)
}

/// Rounds a percentage to [`PERCENT_PRECISION`]
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp(PERCENT_PRECISION)
}

/// Expresses `part` as a percentage of `base`
///
/// Returns zero when `base` is zero: a zero base only occurs when no capital
/// is at work, and the percentage is then defined as zero rather than an error.
/// Returns `None` when the ratio leaves the decimal range.
///
/// # Example
///
/// ```rust
/// use core_kernel::percent_of;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percent_of(dec!(25), dec!(200)), Some(dec!(12.5)));
/// assert_eq!(percent_of(dec!(25), Decimal::ZERO), Some(Decimal::ZERO));
/// ```
pub fn percent_of(part: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_div(base)?.checked_mul(dec!(100))
}

/// Parses a required decimal field
///
/// Accepts plain (`10733.50`) and scientific (`1.5e3`) notation, surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns `CoreError::MalformedInput` naming the field if the value is empty
/// or not a number.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::malformed(field, raw));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::malformed(field, raw))
}

/// Parses an optional decimal field, treating an empty value as absent
pub fn parse_optional_decimal(field: &str, raw: &str) -> Result<Option<Decimal>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_decimal(field, raw).map(Some)
}

/// Parses a calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| CoreError::malformed(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price_keeps_six_places() {
        assert_eq!(round_price(dec!(0.91478672)), dec!(0.914787));
    }

    #[test]
    fn test_percent_of_zero_base() {
        assert_eq!(percent_of(dec!(100), Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("deposits", "1.5e3").unwrap(), dec!(1500));
    }
}
