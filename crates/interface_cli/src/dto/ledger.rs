//! Ledger DTOs
//!
//! Rows are written with the column names of the fund spreadsheets so that
//! existing sheets and rebuilt ledgers line up column for column. Decimal
//! values are written as strings, with every digit unless rounding is asked for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{
    parse_date, parse_decimal, parse_optional_decimal, round_currency, round_percent, round_price,
    round_units,
};
use domain_nav::{
    DailyInput, FeePolicy, Fund, FundLedger, InputSet, LedgerRow, NavError, RawDailyInput,
    ReplayFailure, SeedState,
};

use crate::dto::fund::FundResponse;

/// Seed figures as written in a request file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSeed {
    pub date: String,
    pub aum: String,
    /// Seed units; the seed is priced at par when left empty
    #[serde(default)]
    pub units: String,
}

impl TryFrom<RawSeed> for SeedState {
    type Error = NavError;

    fn try_from(raw: RawSeed) -> Result<Self, Self::Error> {
        let date = parse_date("seed.date", &raw.date)?;
        let aum = parse_decimal("seed.aum", &raw.aum)?;

        match parse_optional_decimal("seed.units", &raw.units)? {
            Some(units) => SeedState::new(date, aum, units),
            None => SeedState::at_par(date, aum),
        }
    }
}

/// A request to rebuild one fund's ledger
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerRequest {
    pub fund_code: String,
    /// Needed only for funds outside the standard catalog
    #[serde(default)]
    pub tracked_asset: Option<String>,
    pub seed: RawSeed,
    #[serde(default)]
    pub inputs: Vec<RawDailyInput>,
}

impl LedgerRequest {
    /// Resolves the fund named by the request
    ///
    /// # Errors
    ///
    /// Returns `FundNotFound` for a code outside the catalog with no
    /// tracked asset given.
    pub fn fund(&self) -> Result<Fund, NavError> {
        if let Some(asset) = &self.tracked_asset {
            return Ok(Fund::new(self.fund_code.clone(), asset.clone()));
        }
        Fund::standard_catalog()
            .into_iter()
            .find(|fund| fund.code == self.fund_code)
            .ok_or_else(|| NavError::FundNotFound(self.fund_code.clone()))
    }

    /// Parses the request and replays the fund's full history
    ///
    /// A replay failure is not an error here: the returned ledger holds the
    /// rows before the failing date and reports the failure.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for unparseable fields, `DuplicateDate` when
    /// two records share a date, or the fund and policy errors.
    pub fn into_ledger(self, policy: FeePolicy) -> Result<FundLedger, NavError> {
        let fund = self.fund()?;
        let seed = SeedState::try_from(self.seed)?;
        let records = self
            .inputs
            .into_iter()
            .map(DailyInput::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let inputs = InputSet::try_from_unique(records)?;

        FundLedger::with_history(fund, seed, policy, inputs)
    }
}

/// One ledger row in spreadsheet layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Initial AUM")]
    pub initial_aum: String,
    #[serde(rename = "Deposits")]
    pub deposits: String,
    #[serde(rename = "Withdrawals")]
    pub withdrawals: String,
    #[serde(rename = "Units to Mint")]
    pub units_to_mint: String,
    #[serde(rename = "Units to Burn")]
    pub units_to_burn: String,
    #[serde(rename = "Net Units")]
    pub net_units: String,
    #[serde(rename = "Units")]
    pub units: String,
    #[serde(rename = "Post Mov Aum")]
    pub post_mov_aum: String,
    #[serde(rename = "Unrealized Performance $")]
    pub unrealized_performance: String,
    #[serde(rename = "Unrealized Performance %")]
    pub unrealized_pct: String,
    #[serde(rename = "Realized Performance $")]
    pub realized_performance: String,
    #[serde(rename = "Realized Performance %")]
    pub realized_pct: String,
    #[serde(rename = "Initial Price per Unit")]
    pub initial_ppu: String,
    #[serde(rename = "Close Price per Unit")]
    pub close_ppu: String,
    #[serde(rename = "Servicing Fee")]
    pub servicing_fee: String,
    #[serde(rename = "Trading Costs")]
    pub trading_costs: String,
    #[serde(rename = "Price per Unit with MER")]
    pub price_with_mer: String,
    #[serde(rename = "PPU Change")]
    pub ppu_change: String,
    #[serde(rename = "Final AUM")]
    pub final_aum: String,
    #[serde(rename = "Total Performance %")]
    pub total_perf_pct: String,
    #[serde(rename = "AUM_Change")]
    pub aum_change: String,
    #[serde(rename = "AUM_Change_%")]
    pub aum_change_pct: String,
    // Same figure as "PPU Change"; both columns exist in the sheets
    #[serde(rename = "PPU_MER_Change")]
    pub ppu_mer_change: String,
    #[serde(rename = "PPU_MER_Change_%")]
    pub ppu_mer_change_pct: String,
}

/// How decimal figures are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Every digit the engine computed
    #[default]
    Full,
    /// Prices and units at 6 places, amounts at 2, percentages at 4
    Rounded,
}

impl Precision {
    fn amount(self, value: Decimal) -> String {
        self.apply(value, round_currency)
    }

    fn price(self, value: Decimal) -> String {
        self.apply(value, round_price)
    }

    fn units(self, value: Decimal) -> String {
        self.apply(value, round_units)
    }

    fn percent(self, value: Decimal) -> String {
        self.apply(value, round_percent)
    }

    fn apply(self, value: Decimal, round: fn(Decimal) -> Decimal) -> String {
        match self {
            Precision::Full => value.to_string(),
            Precision::Rounded => round(value).to_string(),
        }
    }
}

impl LedgerRecord {
    pub fn new(row: &LedgerRow, precision: Precision) -> Self {
        let p = precision;
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            initial_aum: p.amount(row.initial_aum),
            deposits: p.amount(row.deposits),
            withdrawals: p.amount(row.withdrawals),
            units_to_mint: p.units(row.units_to_mint),
            units_to_burn: p.units(row.units_to_burn),
            net_units: p.units(row.net_units),
            units: p.units(row.units_end),
            post_mov_aum: p.amount(row.post_mov_aum),
            unrealized_performance: p.amount(row.unrealized_performance),
            unrealized_pct: p.percent(row.unrealized_pct),
            realized_performance: p.amount(row.realized_performance),
            realized_pct: p.percent(row.realized_pct),
            initial_ppu: p.price(row.initial_ppu),
            close_ppu: p.price(row.close_ppu),
            servicing_fee: p.amount(row.servicing_fee),
            trading_costs: p.amount(row.trading_costs),
            price_with_mer: p.price(row.price_with_mer),
            ppu_change: p.price(row.ppu_change),
            final_aum: p.amount(row.final_aum),
            total_perf_pct: p.percent(row.total_perf_pct),
            aum_change: p.amount(row.aum_change),
            aum_change_pct: p.percent(row.aum_change_pct),
            ppu_mer_change: p.price(row.ppu_change),
            ppu_mer_change_pct: p.percent(row.ppu_change_pct),
        }
    }
}

impl From<&LedgerRow> for LedgerRecord {
    fn from(row: &LedgerRow) -> Self {
        Self::new(row, Precision::Full)
    }
}

/// A rebuilt ledger, possibly cut short by a failure
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub fund: FundResponse,
    pub rows: Vec<LedgerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ReplayFailure>,
}

impl LedgerResponse {
    pub fn new(ledger: &FundLedger, precision: Precision) -> Self {
        Self {
            fund: FundResponse::from(ledger.fund()),
            rows: ledger
                .rows()
                .iter()
                .map(|row| LedgerRecord::new(row, precision))
                .collect(),
            failure: ledger.failure().cloned(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl From<&FundLedger> for LedgerResponse {
    fn from(ledger: &FundLedger) -> Self {
        Self::new(ledger, Precision::Full)
    }
}
