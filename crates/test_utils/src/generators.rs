//! Property-Based Test Generators
//!
//! Proptest strategies for seeds, daily inputs and input histories that
//! respect the ledger's sign conventions.

use chrono::{Days, NaiveDate};
use domain_nav::{DailyInput, FeePolicy, SeedState};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::SeedFixtures;

/// Strategy for non-negative amounts with cents (0.00 to 100,000.00)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for withdrawals, mostly zero or modest and sometimes larger
/// than any generated seed (10,000,000.00 to 20,000,000.00)
pub fn withdrawal_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        3 => Just(Decimal::ZERO),
        4 => amount_strategy(),
        1 => (1_000_000_000i64..2_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Strategy for signed performance figures (-500.00 to 500.00)
pub fn performance_strategy() -> impl Strategy<Value = Decimal> {
    (-50_000i64..50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for small trading costs (0.00 to 50.00)
pub fn trading_cost_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..5_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for annual fee rates between 0% and 10%
pub fn annual_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000i64).prop_map(|bps| Decimal::new(bps, 4))
}

/// Strategy for valid fee policies
pub fn fee_policy_strategy() -> impl Strategy<Value = FeePolicy> {
    (annual_rate_strategy(), prop_oneof![Just(360u32), Just(365u32)], any::<bool>()).prop_map(
        |(rate, days, seed_fee)| {
            FeePolicy::new(rate, days)
                .expect("generated valid policy")
                .with_seed_day_fee(seed_fee)
        },
    )
}

/// Strategy for seeds large enough that generated losses never exhaust them
///
/// AUM ranges over 100,000.00 to 1,000,000.00; units are AUM divided by a
/// starting price between 0.50 and 5.00.
pub fn seed_strategy() -> impl Strategy<Value = SeedState> {
    (10_000_000i64..100_000_000i64, 50i64..500i64).prop_map(|(aum_cents, price_cents)| {
        let aum = Decimal::new(aum_cents, 2);
        let units = aum / Decimal::new(price_cents, 2);
        SeedState::new(SeedFixtures::seed_date(), aum, units).expect("generated valid seed")
    })
}

/// Strategy for the figures of one day, without withdrawals
pub fn inflow_day_strategy(date: NaiveDate) -> impl Strategy<Value = DailyInput> {
    (
        amount_strategy(),
        performance_strategy(),
        performance_strategy(),
        trading_cost_strategy(),
    )
        .prop_map(move |(deposits, unrealized, realized, costs)| {
            DailyInput::new(date)
                .with_deposits(deposits)
                .with_performance(unrealized, realized)
                .with_trading_costs(costs)
        })
}

/// Strategy for the figures of one day, with deposits and withdrawals
pub fn flow_day_strategy(date: NaiveDate) -> impl Strategy<Value = DailyInput> {
    (inflow_day_strategy(date), withdrawal_strategy())
        .prop_map(|(input, withdrawals)| input.with_withdrawals(withdrawals))
}

/// Strategy for an ascending history of inflow-only days after the seed
///
/// Dates may skip up to three days between records. Every generated history
/// replays without error against a seed from [`seed_strategy`].
pub fn inflow_history_strategy(max_days: usize) -> impl Strategy<Value = Vec<DailyInput>> {
    history_dates(max_days).prop_flat_map(|dates| {
        dates.into_iter().map(inflow_day_strategy).collect::<Vec<_>>()
    })
}

/// Strategy for an ascending history with deposits and withdrawals
///
/// Large withdrawals can exhaust the fund, so a replay of these histories
/// may halt part way through.
pub fn flow_history_strategy(max_days: usize) -> impl Strategy<Value = Vec<DailyInput>> {
    history_dates(max_days).prop_flat_map(|dates| {
        dates.into_iter().map(flow_day_strategy).collect::<Vec<_>>()
    })
}

/// Ascending dates after the seed, skipping up to three days between records
fn history_dates(max_days: usize) -> impl Strategy<Value = Vec<NaiveDate>> {
    proptest::collection::vec(1u64..4u64, 1..=max_days).prop_map(|gaps| {
        let mut date = SeedFixtures::seed_date();
        gaps.into_iter()
            .map(|gap| {
                date = date + Days::new(gap);
                date
            })
            .collect()
    })
}
