//! Property-based tests for the root-scoped store.
//!
//! These tests use proptest to generate random keys and values and verify
//! that the get-or-compute invariants hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::cursor::RootScope;
    use proptest::prelude::*;
    use std::sync::Arc;

    proptest! {
        /// Property: the second access under any key observes the first
        /// stored value, never the second supplier's value
        #[test]
        fn compute_if_absent_is_first_writer_wins(
            key in "[a-z0-9.]{1,40}",
            first in any::<u64>(),
            second in any::<u64>(),
        ) {
            let scope = RootScope::new();
            let a = scope.compute_if_absent(&key, || Ok(first)).unwrap();
            let b = scope.compute_if_absent(&key, || Ok(second)).unwrap();
            prop_assert_eq!(*a, first);
            prop_assert!(Arc::ptr_eq(&a, &b));
        }

        /// Property: distinct keys never observe each other's values
        #[test]
        fn distinct_keys_are_isolated(
            key_a in "a[a-z0-9.]{0,39}",
            key_b in "b[a-z0-9.]{0,39}",
            value_a in any::<u64>(),
            value_b in any::<u64>(),
        ) {
            let scope = RootScope::new();
            let a = scope.compute_if_absent(&key_a, || Ok(value_a)).unwrap();
            let b = scope.compute_if_absent(&key_b, || Ok(value_b)).unwrap();
            prop_assert_eq!(*a, value_a);
            prop_assert_eq!(*b, value_b);
        }

        /// Property: the store holds exactly one entry per distinct key,
        /// however many times each key is accessed
        #[test]
        fn store_size_tracks_distinct_keys(
            keys in proptest::collection::vec("[a-z]{1,6}", 1..20),
        ) {
            let scope = RootScope::new();
            for key in &keys {
                scope.compute_if_absent(key, || Ok(0u8)).unwrap();
                scope.compute_if_absent(key, || Ok(1u8)).unwrap();
            }
            let distinct: std::collections::HashSet<_> = keys.iter().collect();
            prop_assert_eq!(scope.len().unwrap(), distinct.len());
        }
    }
}
