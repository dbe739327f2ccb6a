//! Property-based invariant tests for instrumented traces.
//!
//! ## Invariants
//!
//! 1. Exhausted traces leave a sorted permutation of the input
//! 2. Finalized events cover every index
//! 3. Compare events never change the array
//! 4. Every changed snapshot is announced by an Exchange event
//! 5. The input slice is untouched

use proptest::prelude::*;
use sortviz_core::{
    Algorithm, Element, StepKind, elements_from_values, is_sorted_by_value, same_identities,
};

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..100, 0..48)
}

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

// ── 1. Sorted permutation ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn exhausted_trace_is_sorted_permutation(values in arb_values(), algo in arb_algorithm()) {
        let input = elements_from_values(&values);
        let mut trace = algo.trace(&input);
        let last = trace.by_ref().last();
        prop_assert!(is_sorted_by_value(trace.working()));
        prop_assert!(same_identities(trace.working(), &input));
        if let Some(last) = last {
            prop_assert!(is_sorted_by_value(&last.snapshot));
            prop_assert!(same_identities(&last.snapshot, &input));
        } else {
            prop_assert!(input.is_empty());
        }
    }
}

// ── 2. Finalized coverage ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn finalized_covers_every_index(values in arb_values(), algo in arb_algorithm()) {
        let input = elements_from_values(&values);
        let mut seen = vec![false; input.len()];
        for event in algo.trace(&input) {
            if event.kind == StepKind::Finalized {
                for idx in event.indices {
                    prop_assert!(idx < seen.len());
                    seen[idx] = true;
                }
            }
        }
        prop_assert!(seen.iter().all(|&s| s), "{algo}: missing finalized index");
    }
}

// ── 3 & 4. Mutations are always announced ─────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn only_exchanges_change_the_array(values in arb_values(), algo in arb_algorithm()) {
        let input = elements_from_values(&values);
        let mut previous: Vec<Element> = input.clone();
        for event in algo.trace(&input) {
            let changed = previous.as_slice() != &*event.snapshot;
            match event.kind {
                StepKind::Compare | StepKind::Finalized => prop_assert!(!changed, "{algo}: silent mutation at {event}"),
                StepKind::Exchange => {
                    for (pos, (before, after)) in previous.iter().zip(event.snapshot.iter()).enumerate() {
                        if before != after {
                            prop_assert!(event.indices.contains(&pos), "{algo}: {event} moved {pos}");
                        }
                    }
                }
            }
            previous = event.snapshot.to_vec();
        }
    }
}

// ── 5. Input untouched ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn input_slice_untouched(values in arb_values(), algo in arb_algorithm()) {
        let input = elements_from_values(&values);
        let before = input.clone();
        algo.trace(&input).for_each(drop);
        prop_assert_eq!(input, before);
    }
}

// ── Permutation coverage on a fixed set ───────────────────────────────────

fn permutations(values: &[u32]) -> Vec<Vec<u32>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..values.len() {
        let mut rest = values.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn all_permutations_of_five_sort_correctly() {
    for perm in permutations(&[1, 2, 3, 3, 5]) {
        let input = elements_from_values(&perm);
        for algo in Algorithm::ALL {
            let mut trace = algo.trace(&input);
            trace.by_ref().for_each(drop);
            assert!(is_sorted_by_value(trace.working()), "{algo} on {perm:?}");
            assert!(same_identities(trace.working(), &input), "{algo} on {perm:?}");
        }
    }
}
