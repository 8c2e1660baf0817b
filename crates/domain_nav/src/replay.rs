//! History replay
//!
//! Rebuilds a fund's ledger by running seed initialization once and then the
//! day-step once per later input date, in ascending date order, threading each
//! row's closing state into the next day. Replay is fail-fast: the first
//! failing day stops it, and only the rows before that day are returned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{NavError, NavErrorKind};
use crate::fee::FeePolicy;
use crate::input::{DailyInput, InputSet};
use crate::row::{ClosingState, LedgerRow};
use crate::seed::{initialize_seed, SeedState};
use crate::step::step;

/// Where and why a replay stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayFailure {
    pub date: NaiveDate,
    pub kind: NavErrorKind,
    #[serde(serialize_with = "serialize_error")]
    pub error: NavError,
}

fn serialize_error<S>(error: &NavError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

impl ReplayFailure {
    fn new(date: NaiveDate, error: NavError) -> Self {
        Self {
            date,
            kind: error.kind(),
            error,
        }
    }
}

/// Rows produced by a replay, plus the failure that stopped it, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    pub rows: Vec<LedgerRow>,
    pub failure: Option<ReplayFailure>,
}

impl ReplayOutcome {
    /// Returns true if every input date produced a row
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Closing state of the last produced row
    pub fn closing(&self) -> Option<ClosingState> {
        self.rows.last().map(LedgerRow::closing)
    }

    /// Converts to a `Result`, discarding partial rows on failure
    pub fn into_result(self) -> Result<Vec<LedgerRow>, NavError> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok(self.rows),
        }
    }

    /// Splits into rows and the `(date, kind)` of the failure
    pub fn into_parts(self) -> (Vec<LedgerRow>, Option<(NaiveDate, NavErrorKind)>) {
        let failure = self.failure.map(|f| (f.date, f.kind));
        (self.rows, failure)
    }
}

/// Rebuilds a complete ledger from the seed and the full input set
///
/// Deterministic: the same seed, inputs and policy always give the same
/// outcome. Records dated before the seed stop the replay before any row is
/// produced.
#[instrument(skip(inputs, policy), fields(seed_date = %seed.date, days = inputs.len()))]
pub fn rebuild(seed: &SeedState, inputs: &InputSet, policy: &FeePolicy) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();

    if let Some(first) = inputs.first_date() {
        if first < seed.date {
            let error = NavError::DateBeforeSeed {
                date: first,
                seed_date: seed.date,
            };
            return halt(outcome, first, error);
        }
    }

    match initialize_seed(seed, inputs.get(seed.date), policy) {
        Ok(row) => outcome.rows.push(row),
        Err(error) => return halt(outcome, seed.date, error),
    }

    let outcome = replay_days(outcome, inputs.after(seed.date), policy);
    log_outcome(&outcome);
    outcome
}

/// Rebuilds from the earliest edited date, reusing untouched rows
///
/// Rows of `previous` dated before `from` are kept verbatim and replay resumes
/// from the last kept row's closing state, so the result is identical to a
/// full [`rebuild`] as long as the inputs before `from` are unchanged.
#[instrument(skip(previous, inputs, policy), fields(seed_date = %seed.date, %from))]
pub fn rebuild_from(
    previous: &[LedgerRow],
    seed: &SeedState,
    inputs: &InputSet,
    policy: &FeePolicy,
    from: NaiveDate,
) -> ReplayOutcome {
    let kept: Vec<LedgerRow> = previous
        .iter()
        .take_while(|row| row.date < from)
        .cloned()
        .collect();

    let precedes_seed = inputs.first_date().is_some_and(|first| first < seed.date);
    let resume_after = match kept.last() {
        Some(last) if from > seed.date && !precedes_seed => last.date,
        _ => return rebuild(seed, inputs, policy),
    };

    let outcome = ReplayOutcome {
        rows: kept,
        failure: None,
    };
    let outcome = replay_days(outcome, inputs.after(resume_after), policy);
    log_outcome(&outcome);
    outcome
}

fn replay_days<'a>(
    mut outcome: ReplayOutcome,
    days: impl Iterator<Item = &'a DailyInput>,
    policy: &FeePolicy,
) -> ReplayOutcome {
    let fee_rate = policy.daily_rate();

    for input in days {
        let Some(prior) = outcome.closing() else {
            break;
        };

        match step(&prior, input, fee_rate) {
            Ok(row) => outcome.rows.push(row),
            Err(error) => return halt(outcome, input.date, error),
        }
    }

    outcome
}

fn halt(mut outcome: ReplayOutcome, date: NaiveDate, error: NavError) -> ReplayOutcome {
    warn!(%date, error = %error, rows = outcome.rows.len(), "Replay halted");
    outcome.failure = Some(ReplayFailure::new(date, error));
    outcome
}

fn log_outcome(outcome: &ReplayOutcome) {
    if outcome.is_complete() {
        info!(
            rows = outcome.rows.len(),
            last_date = ?outcome.rows.last().map(|row| row.date),
            "Replay complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn seed() -> SeedState {
        SeedState::at_par(day(21), dec!(1000)).unwrap()
    }

    #[test]
    fn test_empty_inputs_give_seed_row_only() {
        let outcome = rebuild(&seed(), &InputSet::new(), &FeePolicy::default());

        assert!(outcome.is_complete());
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].date, day(21));
    }

    #[test]
    fn test_input_before_seed_halts() {
        let inputs = InputSet::from_records(vec![DailyInput::new(day(20))]);
        let outcome = rebuild(&seed(), &inputs, &FeePolicy::default());

        assert!(outcome.rows.is_empty());
        let (_, failure) = outcome.into_parts();
        assert_eq!(failure, Some((day(20), NavErrorKind::DateBeforeSeed)));
    }

    #[test]
    fn test_failure_keeps_earlier_rows() {
        let inputs = InputSet::from_records(vec![
            DailyInput::new(day(22)),
            DailyInput::new(day(23)).with_withdrawals(dec!(5000)),
            DailyInput::new(day(24)),
        ]);
        let outcome = rebuild(&seed(), &inputs, &FeePolicy::default());

        assert_eq!(outcome.rows.len(), 2);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.date, day(23));
        assert_eq!(failure.kind, NavErrorKind::NonPositiveUnits);
    }
}
