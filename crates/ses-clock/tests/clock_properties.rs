//! Property tests for the clock algebra.

use proptest::prelude::*;

use ses_clock::{LogicClock, VectorClock};

/// Build a non-null clock of `size` from raw components.
fn clock_from(values: &[i32], owner: usize) -> LogicClock {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    LogicClock::decode(&bytes, values.len(), owner).unwrap()
}

fn components(size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0..1_000_i32, size)
}

/// A matrix for (n, id) with each slot either left untouched or driven to
/// arbitrary non-negative values by merges.
fn matrix_strategy() -> impl Strategy<Value = VectorClock> {
    (1_usize..6).prop_flat_map(|n| {
        (
            0..n,
            prop::collection::vec(prop::option::of(components(n)), n),
            0_u8..10,
        )
            .prop_map(move |(id, rows, bumps)| {
                let mut vc = VectorClock::new(n, id).unwrap();
                for (slot, row) in rows.iter().enumerate() {
                    if let Some(values) = row {
                        vc.merge_from_remote(&carrier(n, slot, values), slot, slot)
                            .unwrap();
                    }
                }
                for _ in 0..bumps {
                    vc.increment();
                }
                vc
            })
    })
}

/// A matrix whose slot `slot` holds exactly `values`.
fn carrier(n: usize, slot: usize, values: &[i32]) -> VectorClock {
    let mut bytes = (slot as i32).to_be_bytes().to_vec();
    for row in 0..n {
        let row_values: Vec<i32> = if row == slot {
            values.to_vec()
        } else {
            vec![-1; n]
        };
        for v in row_values {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
    }
    ses_clock::wire::decode(&bytes, n).unwrap().sender
}

proptest! {
    #[test]
    fn encode_then_decode_is_lossless(
        vc in matrix_strategy(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let bytes = vc.encode(&payload);
        let envelope = ses_clock::wire::decode(&bytes, vc.n_instance()).unwrap();
        prop_assert_eq!(envelope.sender.instance_id(), vc.instance_id());
        for (decoded, original) in envelope.sender.slots().iter().zip(vc.slots()) {
            prop_assert_eq!(decoded.values(), original.values());
        }
        prop_assert_eq!(envelope.payload, payload);
    }

    #[test]
    fn increment_is_strictly_monotonic_on_own_component(
        vc in matrix_strategy(),
        steps in 1_usize..20,
    ) {
        let mut vc = vc;
        let id = vc.instance_id();
        for _ in 0..steps {
            let before = vc.own_clock().clone();
            vc.increment();
            let after = vc.own_clock();
            prop_assert_eq!(after.get(id).unwrap(), before.get(id).unwrap() + 1);
            for i in (0..vc.n_instance()).filter(|&i| i != id) {
                prop_assert_eq!(after.get(i), before.get(i));
            }
            prop_assert!(before.less_than(after));
        }
    }

    #[test]
    fn merge_is_idempotent(
        (a, b) in (1_usize..8).prop_flat_map(|n| (components(n), components(n))),
        start_null in any::<bool>(),
    ) {
        let other = clock_from(&b, 0);
        let mut once = if start_null {
            LogicClock::null(a.len(), 0).unwrap()
        } else {
            clock_from(&a, 0)
        };
        once.merge_from(&other);
        let mut twice = once.clone();
        twice.merge_from(&other);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_result_dominates_both_inputs(
        (a, b) in (1_usize..8).prop_flat_map(|n| (components(n), components(n))),
    ) {
        let left = clock_from(&a, 0);
        let right = clock_from(&b, 0);
        let mut merged = left.clone();
        merged.merge_from(&right);
        prop_assert!(left.less_than_or_equal(&merged));
        prop_assert!(right.less_than_or_equal(&merged));

        let mut reversed = right.clone();
        reversed.merge_from(&left);
        prop_assert!(merged.equal(&reversed));
    }

    #[test]
    fn null_first_contact_adopts_exactly(values in (1_usize..8).prop_flat_map(components)) {
        let incoming = clock_from(&values, 0);
        let mut placeholder = LogicClock::null(values.len(), 0).unwrap();
        placeholder.merge_from(&incoming);
        prop_assert_eq!(placeholder.values(), incoming.values());
    }

    #[test]
    fn less_than_or_equal_matches_componentwise_definition(
        (a, b) in (1_usize..6).prop_flat_map(|n| (components(n), components(n))),
    ) {
        let left = clock_from(&a, 0);
        let right = clock_from(&b, 0);
        let expected = a.iter().zip(&b).all(|(x, y)| x <= y);
        prop_assert_eq!(left.less_than_or_equal(&right), expected);
        prop_assert_eq!(left.less_than(&right), expected && a != b);
    }
}
