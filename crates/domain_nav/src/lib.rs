//! Fund NAV Ledger Domain
//!
//! This crate implements the daily Net Asset Value recurrence for
//! independently tracked funds: unit minting and burning, servicing fee
//! accrual, and deterministic replay of a fund's full history.
//!
//! # Key Concepts
//!
//! - **Seed**: The fund right after its first subscription
//! - **Daily Input**: Flows and performance figures entered for one date
//! - **Ledger Row**: The computed figures for one date
//! - **Closing State**: `(final_aum, units_end, price_with_mer)`, carried into the next day
//! - **Replay**: Recomputing every row from the seed (or from an edited date) forward
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_nav::{rebuild, DailyInput, FeePolicy, InputSet, SeedState};
//! use rust_decimal_macros::dec;
//!
//! let seed_date = NaiveDate::from_ymd_opt(2025, 10, 21).unwrap();
//! let seed = SeedState::at_par(seed_date, dec!(10733.50)).unwrap();
//! let inputs = InputSet::from_records(vec![
//!     DailyInput::new(seed_date.succ_opt().unwrap()).with_deposits(dec!(1000)),
//! ]);
//!
//! let outcome = rebuild(&seed, &inputs, &FeePolicy::default());
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.rows.len(), 2);
//! assert_eq!(outcome.rows[1].units_end, dec!(11733.50));
//! ```

pub mod error;
pub mod fee;
pub mod fund;
pub mod input;
pub mod ledger;
pub mod replay;
pub mod row;
pub mod seed;
pub mod step;

pub use error::{NavError, NavErrorKind};
pub use fee::{servicing_fee, FeePolicy, DEFAULT_ANNUAL_RATE, DEFAULT_DAY_COUNT};
pub use fund::Fund;
pub use input::{DailyInput, InputSet, RawDailyInput};
pub use ledger::{FundBook, FundLedger};
pub use replay::{rebuild, rebuild_from, ReplayFailure, ReplayOutcome};
pub use row::{ClosingState, LedgerRow};
pub use seed::{initialize_seed, SeedState};
pub use step::step;
