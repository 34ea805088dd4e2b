// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for denomination conversions

use alloy_primitives::U256;
use evmprobe::{format_units, from_base_units, parse_units, to_base_units, Denomination};
use proptest::prelude::*;

fn denomination() -> impl Strategy<Value = Denomination> {
    prop_oneof![
        Just(Denomination::Wei),
        Just(Denomination::Gwei),
        Just(Denomination::Ether),
    ]
}

fn amount() -> impl Strategy<Value = U256> {
    prop_oneof![
        any::<u64>().prop_map(U256::from),
        any::<u128>().prop_map(U256::from),
        any::<[u64; 4]>().prop_map(U256::from_limbs),
    ]
}

proptest! {
    /// Converting out of base units and back is lossless
    #[test]
    fn prop_base_unit_round_trip(value in amount(), unit in denomination()) {
        let decimal = from_base_units(value, unit).unwrap();
        prop_assert_eq!(to_base_units(&decimal, unit).unwrap(), value);
    }

    /// Formatted amounts parse back to the same value
    #[test]
    fn prop_format_parse_round_trip(value in amount(), unit in denomination()) {
        let text = format_units(value, unit);
        prop_assert_eq!(parse_units(&text, unit).unwrap(), value);
    }

    /// Larger denominations never format to more integer digits
    #[test]
    fn prop_ether_amount_not_larger_than_gwei(value in any::<u128>().prop_map(U256::from)) {
        let ether = from_base_units(value, Denomination::Ether).unwrap();
        let gwei = from_base_units(value, Denomination::Gwei).unwrap();
        prop_assert!(ether <= gwei);
    }
}
