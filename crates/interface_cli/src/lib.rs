//! Command-Line Interface
//!
//! Batch caller for the NAV ledger engine: reads a JSON request holding a
//! fund's seed and raw daily inputs, rebuilds the ledger and returns rows in
//! the fund spreadsheets' column layout.
//!
//! # Example
//!
//! ```rust
//! use domain_nav::FeePolicy;
//! use interface_cli::commands::rebuild_request;
//! use interface_cli::dto::Precision;
//!
//! let body = r#"{
//!     "fund_code": "SCENQ",
//!     "seed": { "date": "2025-10-21", "aum": "10733.50" },
//!     "inputs": [ { "date": "2025-10-22", "deposits": "1000" } ]
//! }"#;
//!
//! let response = rebuild_request(body, FeePolicy::default(), Precision::Full).unwrap();
//! assert!(response.is_complete());
//! assert_eq!(response.rows.len(), 2);
//! assert_eq!(response.rows[1].date, "2025-10-22");
//! ```

pub mod commands;
pub mod config;
pub mod dto;
pub mod error;

pub use commands::{list_funds, rebuild_file, rebuild_request, Command};
pub use config::NavConfig;
pub use error::CliError;
