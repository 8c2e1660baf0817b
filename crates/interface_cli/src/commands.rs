//! Command parsing and execution

use std::fs;
use std::path::{Path, PathBuf};

use domain_nav::{FeePolicy, Fund};
use tracing::{info, warn};

use crate::dto::{FundResponse, LedgerRequest, LedgerResponse, Precision};
use crate::error::CliError;

pub const USAGE: &str = "fund-nav rebuild <request.json> [--rounded] | fund-nav funds";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rebuild the ledger described by a request file
    Rebuild { path: PathBuf, precision: Precision },
    /// List the standard fund catalog
    Funds,
}

impl Command {
    /// Parses the arguments following the program name
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        match args.as_slice() {
            [cmd, path] if cmd == "rebuild" => Ok(Command::Rebuild {
                path: PathBuf::from(path),
                precision: Precision::Full,
            }),
            [cmd, path, flag] if cmd == "rebuild" && flag == "--rounded" => Ok(Command::Rebuild {
                path: PathBuf::from(path),
                precision: Precision::Rounded,
            }),
            [cmd] if cmd == "funds" => Ok(Command::Funds),
            _ => Err(CliError::usage(USAGE)),
        }
    }
}

/// Rebuilds a ledger from a JSON request body
pub fn rebuild_request(
    body: &str,
    policy: FeePolicy,
    precision: Precision,
) -> Result<LedgerResponse, CliError> {
    let request: LedgerRequest = serde_json::from_str(body)?;
    let fund_code = request.fund_code.clone();
    let ledger = request.into_ledger(policy)?;
    let response = LedgerResponse::new(&ledger, precision);

    match &response.failure {
        None => info!(fund = %fund_code, rows = response.rows.len(), "Ledger rebuilt"),
        Some(failure) => warn!(
            fund = %fund_code,
            date = %failure.date,
            kind = %failure.kind,
            rows = response.rows.len(),
            "Ledger rebuilt up to a failing day"
        ),
    }

    Ok(response)
}

/// Reads a request file and rebuilds its ledger
pub fn rebuild_file(
    path: &Path,
    policy: FeePolicy,
    precision: Precision,
) -> Result<LedgerResponse, CliError> {
    let body = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    rebuild_request(&body, policy, precision)
}

/// The standard fund catalog
pub fn list_funds() -> Vec<FundResponse> {
    Fund::standard_catalog().iter().map(FundResponse::from).collect()
}
