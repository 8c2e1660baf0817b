//! Per-fund ledgers and the fund book
//!
//! A [`FundLedger`] owns one fund's seed, input records and computed rows.
//! New days are appended incrementally; corrections go through [`FundLedger::edit`],
//! which replays every row from the edited date forward. Computed rows are
//! never patched field by field.
//!
//! A [`FundBook`] maps fund identifiers to their ledgers. It is an ordinary
//! value owned by the caller; there is no process-wide registry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info};

use core_kernel::FundId;
use crate::error::NavError;
use crate::fee::FeePolicy;
use crate::fund::Fund;
use crate::input::{DailyInput, InputSet};
use crate::replay::{rebuild, rebuild_from, ReplayFailure, ReplayOutcome};
use crate::row::LedgerRow;
use crate::seed::{initialize_seed, SeedState};
use crate::step::step;

/// One fund's ledger
#[derive(Debug, Clone)]
pub struct FundLedger {
    fund: Fund,
    seed: SeedState,
    policy: FeePolicy,
    inputs: InputSet,
    outcome: ReplayOutcome,
}

impl FundLedger {
    /// Opens a new ledger holding only the seed row
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeed` or `InvalidFeePolicy` if either cannot start a
    /// ledger.
    pub fn open(fund: Fund, seed: SeedState, policy: FeePolicy) -> Result<Self, NavError> {
        policy.validate()?;
        let seed_row = initialize_seed(&seed, None, &policy)?;

        info!(fund = %fund.code, seed_date = %seed.date, "Opened fund ledger");

        Ok(Self {
            fund,
            seed,
            policy,
            inputs: InputSet::new(),
            outcome: ReplayOutcome {
                rows: vec![seed_row],
                failure: None,
            },
        })
    }

    /// Loads a ledger from previously stored inputs and rebuilds it
    ///
    /// A replay failure does not prevent loading: the rows before the failing
    /// date are kept and the failure is available through [`Self::failure`].
    pub fn with_history(
        fund: Fund,
        seed: SeedState,
        policy: FeePolicy,
        inputs: InputSet,
    ) -> Result<Self, NavError> {
        policy.validate()?;
        let outcome = rebuild(&seed, &inputs, &policy);

        Ok(Self {
            fund,
            seed,
            policy,
            inputs,
            outcome,
        })
    }

    pub fn fund(&self) -> &Fund {
        &self.fund
    }

    pub fn seed(&self) -> &SeedState {
        &self.seed
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.outcome.rows
    }

    pub fn outcome(&self) -> &ReplayOutcome {
        &self.outcome
    }

    /// The failure that stopped the last replay, if any
    pub fn failure(&self) -> Option<&ReplayFailure> {
        self.outcome.failure.as_ref()
    }

    /// The most recent computed row
    pub fn latest(&self) -> Option<&LedgerRow> {
        self.outcome.rows.last()
    }

    /// The computed row for a date
    pub fn row_at(&self, date: NaiveDate) -> Option<&LedgerRow> {
        self.outcome
            .rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|index| &self.outcome.rows[index])
    }

    /// Return of the closing price per unit between two ledger dates
    ///
    /// Returns `None` if either date has no row or the starting price is zero.
    pub fn price_return(&self, from: NaiveDate, to: NaiveDate) -> Option<Decimal> {
        let start = self.row_at(from)?;
        let end = self.row_at(to)?;

        end.price_with_mer
            .checked_sub(start.price_with_mer)?
            .checked_div(start.price_with_mer)
    }

    /// Appends the next ledger day
    ///
    /// # Errors
    ///
    /// - `FundClosed` if the fund is inactive
    /// - `DuplicateDate` if the date already has a row, `OutOfOrderDate` if
    ///   it is earlier than the latest row (use [`Self::edit`] for both)
    /// - The stored replay failure, if the ledger is currently broken
    /// - Any day-step error; the ledger is left unchanged
    pub fn append(&mut self, input: DailyInput) -> Result<&LedgerRow, NavError> {
        if !self.fund.is_active {
            return Err(NavError::FundClosed(self.fund.code.clone()));
        }
        if let Some(failure) = &self.outcome.failure {
            return Err(failure.error.clone());
        }

        let last = self
            .outcome
            .rows
            .last()
            .ok_or_else(|| NavError::invalid_state(input.date, "ledger has no rows"))?;

        if input.date == last.date {
            return Err(NavError::DuplicateDate(input.date));
        }
        if input.date < last.date {
            return Err(NavError::OutOfOrderDate {
                date: input.date,
                last: last.date,
            });
        }

        let row = step(&last.closing(), &input, self.policy.daily_rate())?;
        debug!(fund = %self.fund.code, date = %row.date, "Appended ledger day");

        self.inputs.insert(input);
        let index = self.outcome.rows.len();
        self.outcome.rows.push(row);
        Ok(&self.outcome.rows[index])
    }

    /// Replaces (or adds) the input record for a date and recomputes every
    /// row from that date forward
    ///
    /// # Errors
    ///
    /// Returns `DateBeforeSeed` or the record's validation error without
    /// touching the ledger. Replay failures are not errors here: they are
    /// reported in the returned outcome.
    pub fn edit(&mut self, input: DailyInput) -> Result<&ReplayOutcome, NavError> {
        if input.date < self.seed.date {
            return Err(NavError::DateBeforeSeed {
                date: input.date,
                seed_date: self.seed.date,
            });
        }
        input.validate()?;

        let date = input.date;
        self.inputs.insert(input);
        self.replay_from(date);

        info!(
            fund = %self.fund.code,
            %date,
            rows = self.outcome.rows.len(),
            "Recomputed ledger after edit"
        );
        Ok(&self.outcome)
    }

    /// Removes the input record for a date and recomputes the later rows
    ///
    /// # Errors
    ///
    /// `CannotRemoveSeed` for the seed date, `InputNotFound` if no record
    /// exists for the date.
    pub fn remove(&mut self, date: NaiveDate) -> Result<DailyInput, NavError> {
        if date == self.seed.date {
            return Err(NavError::CannotRemoveSeed(date));
        }
        let removed = self.inputs.remove(date).ok_or(NavError::InputNotFound(date))?;
        self.replay_from(date);

        info!(fund = %self.fund.code, %date, "Removed ledger day");
        Ok(removed)
    }

    /// Switches the fee policy and rebuilds the whole ledger
    pub fn set_policy(&mut self, policy: FeePolicy) -> Result<&ReplayOutcome, NavError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self.rebuild())
    }

    /// Rebuilds every row from the seed
    pub fn rebuild(&mut self) -> &ReplayOutcome {
        self.outcome = rebuild(&self.seed, &self.inputs, &self.policy);
        &self.outcome
    }

    fn replay_from(&mut self, from: NaiveDate) {
        let rows = &self.outcome.rows;
        self.outcome = rebuild_from(rows, &self.seed, &self.inputs, &self.policy, from);
    }
}

/// Ledgers for several funds, keyed by fund identifier
#[derive(Debug, Clone, Default)]
pub struct FundBook {
    ledgers: HashMap<FundId, FundLedger>,
}

impl FundBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ledger, returning any ledger it replaced for the same fund
    pub fn insert(&mut self, ledger: FundLedger) -> Option<FundLedger> {
        self.ledgers.insert(ledger.fund.id, ledger)
    }

    pub fn remove(&mut self, id: &FundId) -> Option<FundLedger> {
        self.ledgers.remove(id)
    }

    pub fn get(&self, id: &FundId) -> Option<&FundLedger> {
        self.ledgers.get(id)
    }

    pub fn get_mut(&mut self, id: &FundId) -> Option<&mut FundLedger> {
        self.ledgers.get_mut(id)
    }

    /// Finds a ledger by fund code
    pub fn by_code(&self, code: &str) -> Option<&FundLedger> {
        self.ledgers.values().find(|ledger| ledger.fund.code == code)
    }

    /// Finds a ledger by fund code for modification
    ///
    /// # Errors
    ///
    /// Returns `FundNotFound` if no ledger has the code.
    pub fn ledger_for(&mut self, code: &str) -> Result<&mut FundLedger, NavError> {
        self.ledgers
            .values_mut()
            .find(|ledger| ledger.fund.code == code)
            .ok_or_else(|| NavError::FundNotFound(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Ledgers ordered by fund code
    pub fn ledgers(&self) -> Vec<&FundLedger> {
        let mut ledgers: Vec<&FundLedger> = self.ledgers.values().collect();
        ledgers.sort_by(|a, b| a.fund.code.cmp(&b.fund.code));
        ledgers
    }

    /// Rebuilds every fund's ledger, returning the failures by fund
    pub fn rebuild_all(&mut self) -> Vec<(FundId, ReplayFailure)> {
        let mut failures = Vec::new();
        for (id, ledger) in self.ledgers.iter_mut() {
            if let Some(failure) = &ledger.rebuild().failure {
                failures.push((*id, failure.clone()));
            }
        }
        info!(funds = self.ledgers.len(), failed = failures.len(), "Rebuilt fund book");
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn ledger() -> FundLedger {
        let seed = SeedState::at_par(day(21), dec!(1000)).unwrap();
        FundLedger::open(Fund::new("SCENQ", "TQQQ"), seed, FeePolicy::default()).unwrap()
    }

    #[test]
    fn test_open_has_seed_row() {
        let ledger = ledger();
        assert_eq!(ledger.rows().len(), 1);
        assert_eq!(ledger.latest().unwrap().date, day(21));
    }

    #[test]
    fn test_append_rejects_same_date() {
        let mut ledger = ledger();
        ledger.append(DailyInput::new(day(22))).unwrap();

        let err = ledger.append(DailyInput::new(day(22))).unwrap_err();
        assert_eq!(err, NavError::DuplicateDate(day(22)));
    }

    #[test]
    fn test_append_rejects_earlier_date() {
        let mut ledger = ledger();
        ledger.append(DailyInput::new(day(23))).unwrap();

        let err = ledger.append(DailyInput::new(day(22))).unwrap_err();
        assert!(matches!(err, NavError::OutOfOrderDate { .. }));
    }

    #[test]
    fn test_remove_seed_date_is_rejected() {
        let mut ledger = ledger();
        assert_eq!(ledger.remove(day(21)), Err(NavError::CannotRemoveSeed(day(21))));
    }

    #[test]
    fn test_closed_fund_rejects_append() {
        let seed = SeedState::at_par(day(21), dec!(1000)).unwrap();
        let fund = Fund::new("SCENT", "TECL").deactivate();
        let mut ledger = FundLedger::open(fund, seed, FeePolicy::default()).unwrap();

        assert!(matches!(
            ledger.append(DailyInput::new(day(22))),
            Err(NavError::FundClosed(_))
        ));
    }
}
