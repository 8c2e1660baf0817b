//! The day-step function
//!
//! Turns the previous day's closing state and one day's inputs into that
//! day's ledger row. Pure: nothing is read or written besides the arguments.
//!
//! Units are minted and burned at the opening price (yesterday's closing
//! price after fee). Deposits and withdrawals change the unit count but are
//! excluded from the gross AUM used to price units, so cash movements never
//! show up as performance. The fee is charged on the post-movement AUM.

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::percent_of;
use crate::error::NavError;
use crate::fee::servicing_fee;
use crate::input::DailyInput;
use crate::row::{ClosingState, LedgerRow};

/// How the computed (non-overridden) fee is treated for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeeCharge {
    /// Accrue at the given daily rate
    Accrue(Decimal),
    /// Charge nothing unless the input carries an override
    Waive,
}

/// Computes one ledger row from the prior closing state
///
/// # Arguments
///
/// * `prior` - Closing state of the previous ledger day
/// * `input` - The day's flows and performance figures
/// * `fee_rate` - Daily servicing fee rate
///
/// # Errors
///
/// - `InvalidState` if the prior units or price are not positive
/// - `NegativeAmount` if the input breaks its sign conventions
/// - `NonPositiveUnits` if withdrawals would leave no units outstanding
/// - `ArithmeticOverflow` if a figure leaves the decimal range
pub fn step(
    prior: &ClosingState,
    input: &DailyInput,
    fee_rate: Decimal,
) -> Result<LedgerRow, NavError> {
    if prior.units_end <= Decimal::ZERO {
        return Err(NavError::invalid_state(
            input.date,
            format!("opening units must be positive, got {}", prior.units_end),
        ));
    }
    if prior.price_with_mer <= Decimal::ZERO {
        return Err(NavError::invalid_state(
            input.date,
            format!("opening price per unit must be positive, got {}", prior.price_with_mer),
        ));
    }

    compute_row(prior, input, FeeCharge::Accrue(fee_rate))
}

pub(crate) fn compute_row(
    prior: &ClosingState,
    input: &DailyInput,
    fee: FeeCharge,
) -> Result<LedgerRow, NavError> {
    input.validate()?;

    let date = input.date;
    let initial_aum = prior.final_aum;
    let initial_units = prior.units_end;
    let initial_ppu = prior.price_with_mer;

    let in_range = |field: &'static str, value: Option<Decimal>| {
        value.ok_or(NavError::ArithmeticOverflow { date, field })
    };

    let units_to_mint = if input.deposits > Decimal::ZERO {
        in_range("units_to_mint", input.deposits.checked_div(initial_ppu))?
    } else {
        Decimal::ZERO
    };
    let units_to_burn = if input.withdrawals > Decimal::ZERO {
        in_range("units_to_burn", input.withdrawals.checked_div(initial_ppu))?
    } else {
        Decimal::ZERO
    };
    let net_units = in_range("net_units", units_to_mint.checked_sub(units_to_burn))?;
    let units_end = in_range("units_end", initial_units.checked_add(net_units))?;

    if units_end <= Decimal::ZERO {
        return Err(NavError::NonPositiveUnits { date, units_end });
    }

    let post_mov_aum = in_range(
        "post_mov_aum",
        initial_aum
            .checked_add(input.deposits)
            .and_then(|aum| aum.checked_sub(input.withdrawals)),
    )?;
    let gross_aum = in_range(
        "gross_aum",
        initial_aum
            .checked_add(input.unrealized_performance)
            .and_then(|aum| aum.checked_add(input.realized_performance))
            .and_then(|aum| aum.checked_sub(input.trading_costs)),
    )?;
    let close_ppu = in_range("close_ppu", gross_aum.checked_div(units_end))?;

    let (servicing_fee, fee_overridden) = match (input.servicing_fee_override, fee) {
        (Some(manual), _) => (manual, true),
        (None, FeeCharge::Accrue(rate)) => (
            in_range("servicing_fee", servicing_fee(close_ppu, post_mov_aum, rate))?,
            false,
        ),
        (None, FeeCharge::Waive) => (Decimal::ZERO, false),
    };

    let fee_per_unit = in_range("fee_per_unit", servicing_fee.checked_div(units_end))?;
    let price_with_mer = in_range("price_with_mer", close_ppu.checked_sub(fee_per_unit))?;
    let final_aum = in_range("final_aum", price_with_mer.checked_mul(units_end))?;

    let ppu_change = in_range("ppu_change", price_with_mer.checked_sub(initial_ppu))?;
    let aum_change = in_range("aum_change", final_aum.checked_sub(initial_aum))?;
    let total_performance = in_range(
        "total_performance",
        input
            .unrealized_performance
            .checked_add(input.realized_performance),
    )?;

    let ppu_change_pct = in_range("ppu_change_pct", percent_of(ppu_change, initial_ppu))?;
    let aum_change_pct = in_range("aum_change_pct", percent_of(aum_change, initial_aum))?;
    let unrealized_pct = in_range(
        "unrealized_pct",
        percent_of(input.unrealized_performance, post_mov_aum),
    )?;
    let realized_pct = in_range(
        "realized_pct",
        percent_of(input.realized_performance, post_mov_aum),
    )?;
    let total_perf_pct = in_range("total_perf_pct", percent_of(total_performance, post_mov_aum))?;

    debug!(
        %date,
        %units_end,
        %servicing_fee,
        %price_with_mer,
        %final_aum,
        "Computed ledger day"
    );

    Ok(LedgerRow {
        date,
        deposits: input.deposits,
        withdrawals: input.withdrawals,
        unrealized_performance: input.unrealized_performance,
        realized_performance: input.realized_performance,
        trading_costs: input.trading_costs,
        initial_aum,
        initial_units,
        initial_ppu,
        units_to_mint,
        units_to_burn,
        net_units,
        units_end,
        post_mov_aum,
        gross_aum,
        close_ppu,
        servicing_fee,
        fee_per_unit,
        fee_overridden,
        price_with_mer,
        final_aum,
        ppu_change,
        ppu_change_pct,
        aum_change,
        aum_change_pct,
        unrealized_pct,
        realized_pct,
        total_perf_pct,
    })
}
