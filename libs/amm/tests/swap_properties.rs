//! Property tests for the constant-product pricing invariants
//!
//! These validate mathematical properties that must always hold regardless
//! of specific pool state: monotonicity, pool conservation, and fee drag.

use proptest::prelude::*;
use rust_decimal::Decimal;
use swaproute_amm::V2Math;

proptest! {
    #[test]
    fn output_is_monotonic_in_input(
        reserve_in in 1_000u128..1_000_000_000_000u128,
        reserve_out in 1_000u128..1_000_000_000_000u128,
        amount_in in 0u128..1_000_000_000u128,
        delta in 1u128..1_000_000u128,
        fee_pips in 0u32..100_000u32,
    ) {
        let smaller = V2Math::get_amount_out(amount_in, reserve_in, reserve_out, fee_pips).unwrap();
        let larger = V2Math::get_amount_out(amount_in + delta, reserve_in, reserve_out, fee_pips).unwrap();
        prop_assert!(larger >= smaller);
    }

    #[test]
    fn output_never_drains_the_pool(
        reserve_in in 1_000u128..1_000_000_000_000u128,
        reserve_out in 1_000u128..1_000_000_000_000u128,
        amount_in in 0u128..10_000_000_000_000_000u128,
        fee_pips in 0u32..100_000u32,
    ) {
        let out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out, fee_pips).unwrap();
        prop_assert!(out < reserve_out);
    }

    #[test]
    fn zero_input_is_free(
        reserve_in in 1_000u128..1_000_000_000_000u128,
        reserve_out in 1_000u128..1_000_000_000_000u128,
        fee_pips in 0u32..100_000u32,
    ) {
        let out = V2Math::get_amount_out(0, reserve_in, reserve_out, fee_pips).unwrap();
        prop_assert_eq!(out, 0);

        let impact = V2Math::price_impact(0, reserve_in, reserve_out, 0).unwrap();
        prop_assert_eq!(impact, Decimal::ZERO);
    }

    #[test]
    fn round_trip_loses_value(
        reserve_in in 10_000u128..1_000_000_000_000u128,
        reserve_out in 10_000u128..1_000_000_000_000u128,
        amount_in in 1u128..1_000_000u128,
        fee_pips in 1u32..100_000u32,
    ) {
        let out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out, fee_pips).unwrap();
        // Swap the proceeds back through the same pool with updated reserves
        let back = V2Math::get_amount_out(
            out,
            reserve_out - out,
            reserve_in + amount_in,
            fee_pips,
        ).unwrap();
        prop_assert!(back < amount_in);
    }

    #[test]
    fn impact_stays_below_budget_for_small_trades(
        reserve_in in 1_000_000u128..1_000_000_000_000u128,
        reserve_out in 1_000_000u128..1_000_000_000_000u128,
        fee_pips in 0u32..100_000u32,
    ) {
        // A trade of 0.01% of the input reserve moves the price well under 1%
        let amount_in = reserve_in / 10_000;
        let out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out, fee_pips).unwrap();
        let impact = V2Math::price_impact(amount_in, reserve_in, reserve_out, out).unwrap();
        prop_assert!(impact < Decimal::new(1, 2));
    }
}
