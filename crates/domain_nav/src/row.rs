//! Computed ledger rows and the closing state threaded between days

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A day's closing figures, which become the next day's opening figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingState {
    /// Closing AUM
    pub final_aum: Decimal,
    /// Units outstanding at close
    pub units_end: Decimal,
    /// Closing price per unit after the servicing fee
    pub price_with_mer: Decimal,
}

impl ClosingState {
    pub fn new(final_aum: Decimal, units_end: Decimal, price_with_mer: Decimal) -> Self {
        Self {
            final_aum,
            units_end,
            price_with_mer,
        }
    }
}

/// One fully computed ledger day
///
/// Rows are derived data: they are never patched in place, only recomputed
/// wholesale by a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,

    // Inputs, echoed for presentation and persistence
    pub deposits: Decimal,
    pub withdrawals: Decimal,
    pub unrealized_performance: Decimal,
    pub realized_performance: Decimal,
    pub trading_costs: Decimal,

    // Opening state
    pub initial_aum: Decimal,
    pub initial_units: Decimal,
    pub initial_ppu: Decimal,

    // Unit effects of the day's flows, priced at the opening price
    pub units_to_mint: Decimal,
    pub units_to_burn: Decimal,
    pub net_units: Decimal,
    pub units_end: Decimal,

    /// Opening AUM plus net flows; fee base and percentage denominator
    pub post_mov_aum: Decimal,

    // Pre-fee valuation
    pub gross_aum: Decimal,
    pub close_ppu: Decimal,

    // Fee accrual
    pub servicing_fee: Decimal,
    pub fee_per_unit: Decimal,
    /// True if the fee came from a manual override
    pub fee_overridden: bool,

    // Closing state
    pub price_with_mer: Decimal,
    pub final_aum: Decimal,

    // Informational only, never fed into later days
    pub ppu_change: Decimal,
    pub ppu_change_pct: Decimal,
    pub aum_change: Decimal,
    pub aum_change_pct: Decimal,
    pub unrealized_pct: Decimal,
    pub realized_pct: Decimal,
    pub total_perf_pct: Decimal,
}

impl LedgerRow {
    /// The triple carried into the next day
    pub fn closing(&self) -> ClosingState {
        ClosingState {
            final_aum: self.final_aum,
            units_end: self.units_end,
            price_with_mer: self.price_with_mer,
        }
    }
}
