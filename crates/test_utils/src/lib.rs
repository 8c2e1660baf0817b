//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fund NAV ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built seeds, funds, and policies
//! - `builders`: Builders for input histories and ledgers
//! - `assertions`: Decimal and ledger assertion helpers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
