//! Property-based tests for ledger replay
//!
//! These tests check the replay invariants over generated seeds, fee
//! policies and input histories. Inflow-only histories always replay to the
//! end; histories with withdrawals may halt part way through.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_nav::{rebuild, rebuild_from, DailyInput, InputSet};
use test_utils::{
    fee_policy_strategy, flow_history_strategy, inflow_history_strategy, performance_strategy,
    seed_strategy, withdrawal_strategy,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Replaying the same inputs twice gives identical ledgers
    #[test]
    fn test_replay_is_deterministic(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
    ) {
        let inputs = InputSet::from_records(history);
        prop_assert_eq!(rebuild(&seed, &inputs, &policy), rebuild(&seed, &inputs, &policy));
    }

    /// The order records are supplied in never changes the ledger
    #[test]
    fn test_replay_ignores_insertion_order(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
    ) {
        let forward = InputSet::from_records(history.clone());
        let backward = InputSet::from_records(history.into_iter().rev());

        prop_assert_eq!(rebuild(&seed, &forward, &policy), rebuild(&seed, &backward, &policy));
    }

    /// Inflow-only histories replay completely, one row per date
    #[test]
    fn test_inflow_histories_complete(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(20),
    ) {
        let days = history.len();
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        prop_assert!(outcome.is_complete());
        prop_assert_eq!(outcome.rows.len(), days + 1);
    }

    /// Each row opens on the previous row's closing state
    #[test]
    fn test_closing_state_carries_forward(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        for pair in outcome.rows.windows(2) {
            prop_assert_eq!(pair[1].initial_aum, pair[0].final_aum);
            prop_assert_eq!(pair[1].initial_units, pair[0].units_end);
            prop_assert_eq!(pair[1].initial_ppu, pair[0].price_with_mer);
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    /// Units change only through minting and burning
    #[test]
    fn test_units_are_conserved(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        for row in &outcome.rows {
            prop_assert_eq!(row.net_units, row.units_to_mint - row.units_to_burn);
            prop_assert_eq!(row.units_end, row.initial_units + row.net_units);
            if row.deposits.is_zero() && row.withdrawals.is_zero() {
                prop_assert_eq!(row.units_end, row.initial_units);
            }
        }
    }

    /// The accrued fee is never negative and never raises the price
    #[test]
    fn test_fee_is_non_negative(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        for row in &outcome.rows {
            prop_assert!(row.servicing_fee >= Decimal::ZERO);
            prop_assert!(row.price_with_mer <= row.close_ppu);
            prop_assert_eq!(row.final_aum, row.price_with_mer * row.units_end);
        }
    }

    /// Total performance percentage is the sum of its parts
    #[test]
    fn test_performance_percentages_add_up(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(10),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        for row in &outcome.rows {
            let diff = (row.total_perf_pct - row.unrealized_pct - row.realized_pct).abs();
            prop_assert!(diff < dec!(0.000000000001));
        }
    }

    /// Editing one day and replaying from it matches a full rebuild
    #[test]
    fn test_partial_replay_matches_full_rebuild(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in inflow_history_strategy(15),
        pick in any::<prop::sample::Index>(),
        unrealized in performance_strategy(),
    ) {
        let mut inputs = InputSet::from_records(history.clone());
        let original = rebuild(&seed, &inputs, &policy);

        let target = &history[pick.index(history.len())];
        let edited = DailyInput {
            unrealized_performance: unrealized,
            ..target.clone()
        };
        let from = edited.date;
        inputs.insert(edited);

        let partial = rebuild_from(&original.rows, &seed, &inputs, &policy, from);
        let full = rebuild(&seed, &inputs, &policy);

        prop_assert_eq!(&partial, &full);
        for (before, after) in original.rows.iter().zip(&full.rows) {
            if before.date < from {
                prop_assert_eq!(before, after);
            }
        }
    }

    /// Histories with withdrawals replay the same way every time
    #[test]
    fn test_flow_replay_is_deterministic(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in flow_history_strategy(15),
    ) {
        let inputs = InputSet::from_records(history);
        prop_assert_eq!(rebuild(&seed, &inputs, &policy), rebuild(&seed, &inputs, &policy));
    }

    /// Kept rows chain and conserve units even when the replay halts
    #[test]
    fn test_flow_rows_chain_and_conserve_units(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in flow_history_strategy(15),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history), &policy);

        for pair in outcome.rows.windows(2) {
            prop_assert_eq!(pair[1].initial_aum, pair[0].final_aum);
            prop_assert_eq!(pair[1].initial_units, pair[0].units_end);
            prop_assert_eq!(pair[1].initial_ppu, pair[0].price_with_mer);
        }
        for row in &outcome.rows {
            prop_assert!(row.units_end > Decimal::ZERO);
            prop_assert_eq!(row.units_end, row.initial_units + row.net_units);
        }
    }

    /// A halted replay holds exactly the rows of a rebuild cut off before the
    /// failing date
    #[test]
    fn test_halted_replay_matches_truncated_rebuild(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in flow_history_strategy(20),
    ) {
        let outcome = rebuild(&seed, &InputSet::from_records(history.clone()), &policy);

        match &outcome.failure {
            None => {
                prop_assert_eq!(outcome.rows.len(), history.len() + 1);
            }
            Some(failure) => {
                let before: Vec<DailyInput> = history
                    .iter()
                    .filter(|input| input.date < failure.date)
                    .cloned()
                    .collect();
                prop_assert_eq!(outcome.rows.len(), before.len() + 1);

                let truncated = rebuild(&seed, &InputSet::from_records(before), &policy);
                prop_assert!(truncated.is_complete());
                prop_assert_eq!(&truncated.rows, &outcome.rows);
            }
        }
    }

    /// Replaying from an edited withdrawal matches a full rebuild, whether
    /// the ledger was broken before the edit, after it, or both
    #[test]
    fn test_partial_replay_matches_full_rebuild_with_failures(
        seed in seed_strategy(),
        policy in fee_policy_strategy(),
        history in flow_history_strategy(15),
        pick in any::<prop::sample::Index>(),
        withdrawals in withdrawal_strategy(),
    ) {
        let mut inputs = InputSet::from_records(history.clone());
        let original = rebuild(&seed, &inputs, &policy);

        let target = &history[pick.index(history.len())];
        let from = target.date;
        inputs.insert(target.clone().with_withdrawals(withdrawals));

        let partial = rebuild_from(&original.rows, &seed, &inputs, &policy, from);
        prop_assert_eq!(partial, rebuild(&seed, &inputs, &policy));
    }
}
