// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for N-ary Freshness
//!
//! Sources start empty and receive random updates. A model keeps the latest
//! value of every source; the derived value must agree with the model after
//! every update.

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;

use live_combinators::{map3, map6, Live, Subscription};

// ============================================================================
// Test Harness
// ============================================================================

/// Source update: (source index, new value)
type Update = (usize, i64);

fn record(live: &Live<Vec<i64>>) -> (Arc<Mutex<Vec<Vec<i64>>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = live.observe(move |value: &Vec<i64>| sink.lock().push(value.clone()));
    (seen, subscription)
}

/// Feed `updates` into `sources` and check the derived value after each one
fn check_freshness(
    sources: &[Live<i64>],
    derived: &Live<Vec<i64>>,
    updates: &[Update],
) -> Result<(), TestCaseError> {
    let (seen, _subscription) = record(derived);
    let mut model: Vec<Option<i64>> = vec![None; sources.len()];
    let mut emissions = 0;

    for &(index, value) in updates {
        let index = index % sources.len();
        model[index] = Some(value);
        sources[index].set_value(value);

        let complete: Option<Vec<i64>> = model.iter().copied().collect();
        match complete {
            Some(latest) => {
                emissions += 1;
                prop_assert_eq!(seen.lock().len(), emissions, "one emission per update");
                prop_assert_eq!(seen.lock().last().cloned(), Some(latest));
            }
            None => {
                prop_assert!(
                    seen.lock().is_empty(),
                    "no emission before every source has a value"
                );
            }
        }
    }
    Ok(())
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a sequence of updates addressed to any of `arity` sources
fn update_sequence(arity: usize) -> impl Strategy<Value = Vec<Update>> {
    prop::collection::vec((0..arity, -1000i64..1000), 0..60)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: a 3-ary derived value always combines the latest values
    #[test]
    fn prop_three_sources_stay_fresh(updates in update_sequence(3)) {
        let sources: Vec<Live<i64>> = (0..3).map(|_| Live::new()).collect();
        let derived = map3(&sources[0], &sources[1], &sources[2], |a, b, c| vec![a, b, c]);

        check_freshness(&sources, &derived, &updates)?;
    }

    /// Property: a 6-ary derived value always combines the latest values
    #[test]
    fn prop_six_sources_stay_fresh(updates in update_sequence(6)) {
        let sources: Vec<Live<i64>> = (0..6).map(|_| Live::new()).collect();
        let derived = map6(
            &sources[0], &sources[1], &sources[2], &sources[3], &sources[4], &sources[5],
            |a, b, c, d, e, f| vec![a, b, c, d, e, f],
        );

        check_freshness(&sources, &derived, &updates)?;
    }

    /// Property: primed sources give an immediate result and stay fresh
    #[test]
    fn prop_primed_sources_emit_on_attach(
        initial in prop::collection::vec(-1000i64..1000, 3),
        updates in update_sequence(3),
    ) {
        let sources: Vec<Live<i64>> = initial.iter().copied().map(Live::with_value).collect();
        let derived = map3(&sources[0], &sources[1], &sources[2], |a, b, c| vec![a, b, c]);
        let (seen, _subscription) = record(&derived);

        prop_assert_eq!(seen.lock().clone(), vec![initial.clone()]);

        let mut latest = initial;
        for (index, value) in updates {
            latest[index] = value;
            sources[index].set_value(value);
        }
        prop_assert_eq!(derived.value(), Some(latest));
    }
}
