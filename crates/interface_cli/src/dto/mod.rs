//! Request and response data transfer objects

pub mod fund;
pub mod ledger;

pub use fund::FundResponse;
pub use ledger::{LedgerRecord, LedgerRequest, LedgerResponse, Precision, RawSeed};
