//! Custom Test Assertions
//!
//! Assertion helpers for decimals and ledger rows that give more useful
//! failure messages than a bare `assert_eq!`.

use chrono::NaiveDate;
use domain_nav::LedgerRow;
use rust_decimal::Decimal;

/// Asserts that two decimals agree when rounded to `dp` fractional digits
///
/// # Panics
///
/// Panics if the rounded values differ
pub fn assert_decimal_eq_dp(actual: Decimal, expected: Decimal, dp: u32) {
    assert_eq!(
        actual.round_dp(dp),
        expected.round_dp(dp),
        "Decimals differ at {} places: actual={}, expected={}",
        dp,
        actual,
        expected
    );
}

/// Asserts that every row opens on the previous row's closing figures
pub fn assert_price_continuity(rows: &[LedgerRow]) {
    for pair in rows.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(
            next.initial_ppu, prev.price_with_mer,
            "Opening price on {} does not match closing price on {}",
            next.date, prev.date
        );
        assert_eq!(
            next.initial_aum, prev.final_aum,
            "Opening AUM on {} does not match closing AUM on {}",
            next.date, prev.date
        );
        assert_eq!(
            next.initial_units, prev.units_end,
            "Opening units on {} do not match closing units on {}",
            next.date, prev.date
        );
    }
}

/// Asserts that rows are strictly ascending by date
pub fn assert_dates_ascending(rows: &[LedgerRow]) {
    for pair in rows.windows(2) {
        assert!(
            pair[0].date < pair[1].date,
            "Rows out of order: {} then {}",
            pair[0].date,
            pair[1].date
        );
    }
}

/// Asserts that two ledgers hold identical rows for every date before `date`
pub fn assert_identical_before(left: &[LedgerRow], right: &[LedgerRow], date: NaiveDate) {
    let left_prefix: Vec<&LedgerRow> = left.iter().filter(|row| row.date < date).collect();
    let right_prefix: Vec<&LedgerRow> = right.iter().filter(|row| row.date < date).collect();
    assert_eq!(left_prefix, right_prefix, "Ledgers differ before {}", date);
}
