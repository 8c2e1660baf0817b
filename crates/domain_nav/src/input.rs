//! Daily input records and the date-keyed input set

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound;

use core_kernel::{parse_date, parse_optional_decimal, CoreError};
use crate::error::NavError;

/// The user-supplied figures for one ledger day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInput {
    /// Ledger date
    pub date: NaiveDate,
    /// Amount subscribed that day
    #[serde(default)]
    pub deposits: Decimal,
    /// Amount redeemed that day
    #[serde(default)]
    pub withdrawals: Decimal,
    /// Unrealized trading P&L attributed to the day
    #[serde(default)]
    pub unrealized_performance: Decimal,
    /// Realized trading P&L attributed to the day
    #[serde(default)]
    pub realized_performance: Decimal,
    /// Costs deducted that day
    #[serde(default)]
    pub trading_costs: Decimal,
    /// Manually entered fee replacing the computed one for this day only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servicing_fee_override: Option<Decimal>,
}

impl DailyInput {
    /// Creates an input record with every figure at zero
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            deposits: Decimal::ZERO,
            withdrawals: Decimal::ZERO,
            unrealized_performance: Decimal::ZERO,
            realized_performance: Decimal::ZERO,
            trading_costs: Decimal::ZERO,
            servicing_fee_override: None,
        }
    }

    pub fn with_deposits(mut self, amount: Decimal) -> Self {
        self.deposits = amount;
        self
    }

    pub fn with_withdrawals(mut self, amount: Decimal) -> Self {
        self.withdrawals = amount;
        self
    }

    /// Sets unrealized and realized performance
    pub fn with_performance(mut self, unrealized: Decimal, realized: Decimal) -> Self {
        self.unrealized_performance = unrealized;
        self.realized_performance = realized;
        self
    }

    pub fn with_trading_costs(mut self, amount: Decimal) -> Self {
        self.trading_costs = amount;
        self
    }

    pub fn with_fee_override(mut self, fee: Decimal) -> Self {
        self.servicing_fee_override = Some(fee);
        self
    }

    /// Returns true if the record moves capital in or out
    pub fn has_flows(&self) -> bool {
        !self.deposits.is_zero() || !self.withdrawals.is_zero()
    }

    /// Checks the sign conventions of the record
    ///
    /// # Errors
    ///
    /// Returns `NavError::NegativeAmount` for the first negative deposit,
    /// withdrawal, trading cost or fee override.
    pub fn validate(&self) -> Result<(), NavError> {
        let checks = [
            ("deposits", Some(self.deposits)),
            ("withdrawals", Some(self.withdrawals)),
            ("trading_costs", Some(self.trading_costs)),
            ("servicing_fee_override", self.servicing_fee_override),
        ];

        for (field, value) in checks {
            if let Some(value) = value {
                if value < Decimal::ZERO {
                    return Err(NavError::NegativeAmount {
                        date: self.date,
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// An input record as typed by a person or read from a text file
///
/// Every field is kept as text until it crosses the input boundary; empty
/// numeric fields mean zero and an empty fee override means "no override".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDailyInput {
    pub date: String,
    #[serde(default)]
    pub deposits: String,
    #[serde(default)]
    pub withdrawals: String,
    #[serde(default)]
    pub unrealized_performance: String,
    #[serde(default)]
    pub realized_performance: String,
    #[serde(default)]
    pub trading_costs: String,
    #[serde(default)]
    pub servicing_fee_override: String,
}

fn amount_or_zero(field: &str, raw: &str) -> Result<Decimal, CoreError> {
    Ok(parse_optional_decimal(field, raw)?.unwrap_or(Decimal::ZERO))
}

impl TryFrom<RawDailyInput> for DailyInput {
    type Error = NavError;

    fn try_from(raw: RawDailyInput) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date("date", &raw.date)?,
            deposits: amount_or_zero("deposits", &raw.deposits)?,
            withdrawals: amount_or_zero("withdrawals", &raw.withdrawals)?,
            unrealized_performance: amount_or_zero(
                "unrealized_performance",
                &raw.unrealized_performance,
            )?,
            realized_performance: amount_or_zero(
                "realized_performance",
                &raw.realized_performance,
            )?,
            trading_costs: amount_or_zero("trading_costs", &raw.trading_costs)?,
            servicing_fee_override: parse_optional_decimal(
                "servicing_fee_override",
                &raw.servicing_fee_override,
            )?,
        })
    }
}

/// A fund's input records, keyed uniquely by date
///
/// Inserting a record for a date that already exists replaces the earlier
/// record, so a later edit always wins over the original entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    records: BTreeMap<NaiveDate, DailyInput>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set with keep-last-write semantics for repeated dates
    pub fn from_records(records: impl IntoIterator<Item = DailyInput>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Builds a set, rejecting repeated dates
    ///
    /// # Errors
    ///
    /// Returns `NavError::DuplicateDate` for the first date seen twice.
    pub fn try_from_unique(
        records: impl IntoIterator<Item = DailyInput>,
    ) -> Result<Self, NavError> {
        let mut set = Self::new();
        for record in records {
            let date = record.date;
            if set.records.insert(date, record).is_some() {
                return Err(NavError::DuplicateDate(date));
            }
        }
        Ok(set)
    }

    /// Inserts a record, returning the one it replaced
    pub fn insert(&mut self, record: DailyInput) -> Option<DailyInput> {
        self.records.insert(record.date, record)
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<DailyInput> {
        self.records.remove(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyInput> {
        self.records.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.keys().next_back().copied()
    }

    /// Iterates records in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = &DailyInput> {
        self.records.values()
    }

    /// Iterates records strictly after `date`, ascending
    pub fn after(&self, date: NaiveDate) -> impl Iterator<Item = &DailyInput> {
        self.records
            .range((Bound::Excluded(date), Bound::Unbounded))
            .map(|(_, record)| record)
    }
}

impl FromIterator<DailyInput> for InputSet {
    fn from_iter<I: IntoIterator<Item = DailyInput>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

impl IntoIterator for InputSet {
    type Item = DailyInput;
    type IntoIter = btree_map::IntoValues<NaiveDate, DailyInput>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_values()
    }
}
