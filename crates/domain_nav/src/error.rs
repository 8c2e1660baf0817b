//! NAV ledger errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur while building or maintaining a fund's ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Seed state cannot start a ledger
    #[error("Invalid seed on {date}: {reason}")]
    InvalidSeed { date: NaiveDate, reason: String },

    /// Prior closing state is unusable (upstream data corruption)
    #[error("Invalid prior state for {date}: {reason}")]
    InvalidState { date: NaiveDate, reason: String },

    /// The day's flows would leave no units outstanding
    #[error("Units would fall to {units_end} on {date}")]
    NonPositiveUnits { date: NaiveDate, units_end: Decimal },

    /// A field that must be non-negative carried a negative value
    #[error("Negative {field} on {date}: {value}")]
    NegativeAmount {
        date: NaiveDate,
        field: &'static str,
        value: Decimal,
    },

    /// A day's figures fall outside the representable decimal range
    #[error("Arithmetic overflow computing {field} on {date}")]
    ArithmeticOverflow { date: NaiveDate, field: &'static str },

    #[error("Duplicate ledger date: {0}")]
    DuplicateDate(NaiveDate),

    #[error("Date {date} precedes the seed date {seed_date}")]
    DateBeforeSeed { date: NaiveDate, seed_date: NaiveDate },

    #[error("Date {date} is not after the last ledger date {last}")]
    OutOfOrderDate { date: NaiveDate, last: NaiveDate },

    #[error("The seed day {0} cannot be removed from the ledger")]
    CannotRemoveSeed(NaiveDate),

    #[error("No input record on {0}")]
    InputNotFound(NaiveDate),

    #[error("Invalid fee policy: {0}")]
    InvalidFeePolicy(String),

    #[error("Fund not found: {0}")]
    FundNotFound(String),

    #[error("Fund is closed for new ledger days: {0}")]
    FundClosed(String),

    #[error("Malformed input: {0}")]
    MalformedInput(#[from] CoreError),
}

impl NavError {
    /// Returns the error's kind, without its payload
    pub fn kind(&self) -> NavErrorKind {
        match self {
            NavError::InvalidSeed { .. } => NavErrorKind::InvalidSeed,
            NavError::InvalidState { .. } => NavErrorKind::InvalidState,
            NavError::NonPositiveUnits { .. } => NavErrorKind::NonPositiveUnits,
            NavError::NegativeAmount { .. } => NavErrorKind::NegativeAmount,
            NavError::ArithmeticOverflow { .. } => NavErrorKind::ArithmeticOverflow,
            NavError::DuplicateDate(_) => NavErrorKind::DuplicateDate,
            NavError::DateBeforeSeed { .. } => NavErrorKind::DateBeforeSeed,
            NavError::OutOfOrderDate { .. } => NavErrorKind::OutOfOrderDate,
            NavError::CannotRemoveSeed(_) => NavErrorKind::CannotRemoveSeed,
            NavError::InputNotFound(_) => NavErrorKind::InputNotFound,
            NavError::InvalidFeePolicy(_) => NavErrorKind::InvalidFeePolicy,
            NavError::FundNotFound(_) => NavErrorKind::FundNotFound,
            NavError::FundClosed(_) => NavErrorKind::FundClosed,
            NavError::MalformedInput(_) => NavErrorKind::MalformedInput,
        }
    }

    /// Returns the ledger date the error refers to, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            NavError::InvalidSeed { date, .. }
            | NavError::InvalidState { date, .. }
            | NavError::NonPositiveUnits { date, .. }
            | NavError::NegativeAmount { date, .. }
            | NavError::ArithmeticOverflow { date, .. }
            | NavError::DateBeforeSeed { date, .. }
            | NavError::OutOfOrderDate { date, .. } => Some(*date),
            NavError::DuplicateDate(date)
            | NavError::CannotRemoveSeed(date)
            | NavError::InputNotFound(date) => Some(*date),
            NavError::InvalidFeePolicy(_)
            | NavError::FundNotFound(_)
            | NavError::FundClosed(_)
            | NavError::MalformedInput(_) => None,
        }
    }

    pub(crate) fn invalid_seed(date: NaiveDate, reason: impl Into<String>) -> Self {
        NavError::InvalidSeed {
            date,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(date: NaiveDate, reason: impl Into<String>) -> Self {
        NavError::InvalidState {
            date,
            reason: reason.into(),
        }
    }
}

/// Payload-free classification of [`NavError`], reported by replay failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavErrorKind {
    InvalidSeed,
    InvalidState,
    NonPositiveUnits,
    NegativeAmount,
    ArithmeticOverflow,
    DuplicateDate,
    DateBeforeSeed,
    OutOfOrderDate,
    CannotRemoveSeed,
    InputNotFound,
    InvalidFeePolicy,
    FundNotFound,
    FundClosed,
    MalformedInput,
}

impl fmt::Display for NavErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavErrorKind::InvalidSeed => "InvalidSeed",
            NavErrorKind::InvalidState => "InvalidState",
            NavErrorKind::NonPositiveUnits => "NonPositiveUnits",
            NavErrorKind::NegativeAmount => "NegativeAmount",
            NavErrorKind::ArithmeticOverflow => "ArithmeticOverflow",
            NavErrorKind::DuplicateDate => "DuplicateDate",
            NavErrorKind::DateBeforeSeed => "DateBeforeSeed",
            NavErrorKind::OutOfOrderDate => "OutOfOrderDate",
            NavErrorKind::CannotRemoveSeed => "CannotRemoveSeed",
            NavErrorKind::InputNotFound => "InputNotFound",
            NavErrorKind::InvalidFeePolicy => "InvalidFeePolicy",
            NavErrorKind::FundNotFound => "FundNotFound",
            NavErrorKind::FundClosed => "FundClosed",
            NavErrorKind::MalformedInput => "MalformedInput",
        };
        f.write_str(name)
    }
}
