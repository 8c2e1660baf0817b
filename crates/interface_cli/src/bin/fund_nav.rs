//! Fund NAV Ledger - Command-Line Binary
//!
//! Rebuilds a fund's ledger from a JSON request file and prints it as JSON
//! using the spreadsheet column names.
//!
//! # Usage
//!
//! ```bash
//! # Rebuild a ledger
//! cargo run --bin fund-nav -- rebuild scenq.json
//!
//! # Same, with prices and units rounded to 6 places
//! cargo run --bin fund-nav -- rebuild scenq.json --rounded
//!
//! # List the fund catalog
//! cargo run --bin fund-nav -- funds
//!
//! # Charge a 5% fee over 360 days, including the seed day
//! NAV_ANNUAL_FEE_RATE=0.05 NAV_DAY_COUNT=360 NAV_CHARGE_FEE_ON_SEED_DAY=true \
//!     cargo run --bin fund-nav -- rebuild scenq.json
//! ```
//!
//! # Environment Variables
//!
//! * `NAV_ANNUAL_FEE_RATE` - Annual servicing fee rate (default: 0.06)
//! * `NAV_DAY_COUNT` - Days the annual rate is spread over (default: 365)
//! * `NAV_CHARGE_FEE_ON_SEED_DAY` - Charge a fee on the seed row (default: false)
//! * `NAV_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//!
//! Logs go to stderr; the ledger goes to stdout. The exit code is non-zero
//! when the replay stopped before the last input date.

use std::process::ExitCode;

use anyhow::Context;
use interface_cli::{list_funds, rebuild_file, Command, NavConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = NavConfig::from_env().context("Failed to load NAV_* configuration")?;
    init_tracing(&config.log_level);

    let command = Command::parse(std::env::args().skip(1))?;
    let policy = config.fee_policy().context("Invalid fee configuration")?;

    tracing::debug!(
        annual_rate = %policy.annual_rate,
        day_count = policy.day_count,
        charge_fee_on_seed_day = policy.charge_fee_on_seed_day,
        "Loaded fee policy"
    );

    match command {
        Command::Funds => {
            println!("{}", serde_json::to_string_pretty(&list_funds())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Rebuild { path, precision } => {
            let response = rebuild_file(&path, policy, precision)
                .with_context(|| format!("Failed to rebuild ledger from {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&response)?);

            if response.is_complete() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
