//! Core Kernel - Foundational types for the fund NAV ledger
//!
//! This crate provides the building blocks shared by the engine and its callers:
//! - Strongly-typed fund identifiers
//! - Decimal precision and percentage helpers
//! - Parsing of human-entered numbers and dates at the input boundary

pub mod identifiers;
pub mod numeric;
pub mod error;

pub use identifiers::FundId;
pub use numeric::{
    percent_of, round_currency, round_percent, round_price, round_units, parse_date,
    parse_decimal, parse_optional_decimal, CURRENCY_PRECISION, PERCENT_PRECISION,
    PRICE_PRECISION, UNIT_PRECISION,
};
pub use error::CoreError;
