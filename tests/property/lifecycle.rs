// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Subscription Lifecycle
//!
//! Observers attach and detach in random order. Sources must be subscribed
//! exactly while at least one observer is attached to the derived value.

use proptest::prelude::*;

use live_combinators::{map4, ActivityState, Live, Subscription};

#[derive(Debug, Clone)]
enum Step {
    Attach,
    Detach(usize),
    Update(usize, i32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Attach),
        (0usize..8).prop_map(Step::Detach),
        (0usize..4, -100i32..100).prop_map(|(index, value)| Step::Update(index, value)),
    ]
}

proptest! {
    /// Property: upstream subscriptions follow the observer count
    #[test]
    fn prop_sources_subscribed_only_while_observed(steps in prop::collection::vec(step(), 0..40)) {
        let sources: Vec<Live<i32>> = (0..4).map(Live::with_value).collect();
        let derived = map4(&sources[0], &sources[1], &sources[2], &sources[3], |a, b, c, d| {
            a + b + c + d
        });
        let mut observers: Vec<Subscription> = Vec::new();

        for step in steps {
            match step {
                Step::Attach => observers.push(derived.observe(|_| {})),
                Step::Detach(index) => {
                    if !observers.is_empty() {
                        let index = index % observers.len();
                        drop(observers.remove(index));
                    }
                }
                Step::Update(index, value) => sources[index].set_value(value),
            }

            let active = !observers.is_empty();
            prop_assert_eq!(derived.observer_count(), observers.len());
            for source in &sources {
                prop_assert_eq!(source.observer_count(), usize::from(active));
            }
            if active {
                prop_assert_eq!(derived.state(), ActivityState::SubscribedHasValue);
                let expected: i32 = sources.iter().filter_map(|source| source.value()).sum();
                prop_assert_eq!(derived.value(), Some(expected));
            } else {
                prop_assert_eq!(derived.state(), ActivityState::Unsubscribed);
                prop_assert!(derived.value().is_none());
            }
        }
    }
}
