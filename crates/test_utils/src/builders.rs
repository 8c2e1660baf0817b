//! Test Data Builders
//!
//! Builders for input histories and fund ledgers. Tests describe only the
//! days that matter; every other figure defaults to zero.

use chrono::{Days, NaiveDate};
use domain_nav::{DailyInput, FeePolicy, Fund, FundLedger, InputSet, SeedState};

use crate::fixtures::{FundFixtures, PolicyFixtures, SeedFixtures};

/// Builder for a run of consecutive (or gapped) daily input records
pub struct HistoryBuilder {
    next_date: NaiveDate,
    records: Vec<DailyInput>,
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuilder {
    /// Starts the history on the day after the reference seed date
    pub fn new() -> Self {
        Self::starting(SeedFixtures::day(1))
    }

    /// Starts the history on a given date
    pub fn starting(date: NaiveDate) -> Self {
        Self {
            next_date: date,
            records: Vec::new(),
        }
    }

    /// Adds a record for the next date, shaped by `configure`
    pub fn day(mut self, configure: impl FnOnce(DailyInput) -> DailyInput) -> Self {
        let record = configure(DailyInput::new(self.next_date));
        self.records.push(record);
        self.advance(1)
    }

    /// Adds `count` records with no flows and no performance
    pub fn quiet_days(mut self, count: u64) -> Self {
        for _ in 0..count {
            self = self.day(|d| d);
        }
        self
    }

    /// Leaves `count` dates without a record
    pub fn skip_days(self, count: u64) -> Self {
        self.advance(count)
    }

    /// Records in the order they were added
    pub fn records(self) -> Vec<DailyInput> {
        self.records
    }

    pub fn build(self) -> InputSet {
        InputSet::from_records(self.records)
    }

    fn advance(mut self, days: u64) -> Self {
        self.next_date = self.next_date + Days::new(days);
        self
    }
}

/// Builder for fund ledgers
pub struct FundLedgerBuilder {
    fund: Fund,
    seed: SeedState,
    policy: FeePolicy,
    inputs: InputSet,
}

impl Default for FundLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundLedgerBuilder {
    pub fn new() -> Self {
        Self {
            fund: FundFixtures::scenq(),
            seed: SeedFixtures::reference(),
            policy: PolicyFixtures::standard(),
            inputs: InputSet::new(),
        }
    }

    pub fn with_fund(mut self, fund: Fund) -> Self {
        self.fund = fund;
        self
    }

    pub fn with_seed(mut self, seed: SeedState) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_policy(mut self, policy: FeePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_inputs(mut self, inputs: InputSet) -> Self {
        self.inputs = inputs;
        self
    }

    /// Builds the ledger, replaying any inputs
    pub fn build(self) -> FundLedger {
        FundLedger::with_history(self.fund, self.seed, self.policy, self.inputs)
            .expect("builder produced an invalid ledger")
    }
}
