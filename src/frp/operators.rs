// Copyright (c) 2025 - Cowboy AI, Inc.
//! Primitive operators on live values
//!
//! `map` and `switch_map` are the two building blocks every combinator in
//! [`combinators`](super::combinators) is made of. Both return a derived
//! [`Live`] that stays unplugged until it is observed.

use parking_lot::Mutex;
use tracing::debug;

use super::live::{Live, SourceId, SourceKind, WeakLive};
use super::signal::Value;

impl<T: Value> Live<T> {
    /// Derive a value by applying `transform` to every value of `self`
    ///
    /// Nothing is emitted before `self` has a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use live_combinators::frp::Live;
    ///
    /// let name = Live::with_value("Alice".to_string());
    /// let greeting = name.map(|name| format!("Hello {name}!"));
    ///
    /// let _sub = greeting.observe(|_| {});
    /// assert_eq!(greeting.value().as_deref(), Some("Hello Alice!"));
    /// ```
    pub fn map<R, F>(&self, transform: F) -> Live<R>
    where
        R: Value,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let derived = Live::derived();
        let target = derived.downgrade();
        derived.attach_source(self, SourceKind::Fixed, move |value: &T| {
            if let Some(target) = target.upgrade() {
                target.set_value(transform(value.clone()));
            }
        });
        derived
    }

    /// Derive a value that follows the live value returned by `switch`
    ///
    /// Every value of `self` produces a new inner live value. The previous
    /// inner value is unplugged before the new one is plugged in, so nothing
    /// computed from an older value of `self` is forwarded afterwards.
    /// Returning the same inner live value again keeps the existing
    /// subscription.
    pub fn switch_map<R, F>(&self, switch: F) -> Live<R>
    where
        R: Value,
        F: Fn(T) -> Live<R> + Send + Sync + 'static,
    {
        let derived = Live::derived();
        let target = derived.downgrade();
        // Weak: the source entry owns the inner value while it is plugged.
        let current: Mutex<Option<(WeakLive<R>, SourceId)>> = Mutex::new(None);

        derived.attach_source(self, SourceKind::Fixed, move |value: &T| {
            let Some(target) = target.upgrade() else {
                return;
            };
            let next = switch(value.clone());

            let previous = current.lock().take();
            let unchanged = previous.as_ref().is_some_and(|(inner, id)| {
                inner.upgrade().is_some_and(|inner| inner.ptr_eq(&next)) && target.has_source(*id)
            });
            if unchanged {
                *current.lock() = previous;
                return;
            }
            if let Some((_, id)) = previous {
                target.remove_source(id);
            }

            debug!(
                live = %target.config().name,
                id = %target.id(),
                inner = %next.id(),
                "switched inner source"
            );
            let forward = target.downgrade();
            let id = target.attach_source(&next, SourceKind::Switched, move |inner: &R| {
                if let Some(target) = forward.upgrade() {
                    target.set_value(inner.clone());
                }
            });
            *current.lock() = Some((next.downgrade(), id));
        });
        derived
    }

    /// Derive a value that only emits when the value actually changes
    ///
    /// The first value is always forwarded.
    pub fn distinct_until_changed(&self) -> Live<T>
    where
        T: PartialEq,
    {
        let derived = Live::derived();
        let target = derived.downgrade();
        derived.attach_source(self, SourceKind::Fixed, move |value: &T| {
            let Some(target) = target.upgrade() else {
                return;
            };
            if target.value().as_ref() == Some(value) {
                return;
            }
            target.set_value(value.clone());
        });
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::ActivityState;
    use std::sync::Arc;

    fn recorder<T: Value>(live: &Live<T>) -> (Arc<Mutex<Vec<T>>>, crate::frp::Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = live.observe(move |value: &T| sink.lock().push(value.clone()));
        (seen, subscription)
    }

    #[test]
    fn test_map_follows_source() {
        let source = Live::with_value(2);
        let doubled = source.map(|x| x * 2);
        let (seen, _sub) = recorder(&doubled);

        source.set_value(5);
        assert_eq!(*seen.lock(), vec![4, 10]);
    }

    #[test]
    fn test_map_is_lazy() {
        let source = Live::with_value(2);
        let doubled = source.map(|x| x * 2);

        assert_eq!(source.observer_count(), 0);
        assert!(doubled.value().is_none());
        assert_eq!(doubled.state(), ActivityState::Unsubscribed);
    }

    #[test]
    fn test_map_waits_for_first_value() {
        let source: Live<i32> = Live::new();
        let doubled = source.map(|x| x * 2);
        let (seen, _sub) = recorder(&doubled);

        assert!(seen.lock().is_empty());
        assert_eq!(doubled.state(), ActivityState::SubscribedNoValue);

        source.set_value(1);
        assert_eq!(*seen.lock(), vec![2]);
        assert_eq!(doubled.state(), ActivityState::SubscribedHasValue);
    }

    #[test]
    fn test_switch_map_releases_previous_inner() {
        let selector = Live::with_value(0usize);
        let inners = vec![Live::with_value("a"), Live::with_value("b")];
        let lookup = inners.clone();
        let switched = selector.switch_map(move |index| lookup[index].clone());
        let (seen, _sub) = recorder(&switched);

        assert_eq!(inners[0].observer_count(), 1);
        assert_eq!(inners[1].observer_count(), 0);

        selector.set_value(1);
        assert_eq!(inners[0].observer_count(), 0);
        assert_eq!(inners[1].observer_count(), 1);

        inners[0].set_value("stale");
        inners[1].set_value("fresh");
        assert_eq!(*seen.lock(), vec!["a", "b", "fresh"]);
    }

    #[test]
    fn test_switch_map_same_inner_keeps_subscription() {
        let selector = Live::with_value(1);
        let inner = Live::with_value(100);
        let shared = inner.clone();
        let switched = selector.switch_map(move |_| shared.clone());
        let (seen, _sub) = recorder(&switched);

        selector.set_value(2);
        assert_eq!(inner.observer_count(), 1);
        assert_eq!(*seen.lock(), vec![100]);
    }

    #[test]
    fn test_switch_map_teardown_and_reactivation() {
        let selector = Live::with_value(1);
        let inner = Live::with_value(7);
        let shared = inner.clone();
        let switched = selector.switch_map(move |_| shared.clone());

        let (_, sub) = recorder(&switched);
        drop(sub);
        assert_eq!(selector.observer_count(), 0);
        assert_eq!(inner.observer_count(), 0);

        let (seen, _sub) = recorder(&switched);
        assert_eq!(inner.observer_count(), 1);
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn test_switch_map_drops_inner_after_deactivation() {
        let selector = Live::with_value(3);
        let created: Arc<Mutex<Option<WeakLive<i32>>>> = Arc::new(Mutex::new(None));
        let sink = created.clone();
        let switched = selector.switch_map(move |value| {
            let inner = Live::with_value(value * 10);
            *sink.lock() = Some(inner.downgrade());
            inner
        });

        let (seen, sub) = recorder(&switched);
        assert_eq!(*seen.lock(), vec![30]);
        assert!(created.lock().as_ref().and_then(WeakLive::upgrade).is_some());

        drop(sub);
        assert!(created.lock().as_ref().and_then(WeakLive::upgrade).is_none());
    }

    #[test]
    fn test_switch_map_forgets_connection_that_panicked() {
        let selector = Live::with_value(1);
        let inner = Live::with_value(5);
        let faulty = inner.map(|value: i32| -> i32 {
            if value == 6 {
                panic!("transform failure");
            }
            value
        });
        let shared = faulty.clone();
        let switched = selector.switch_map(move |_| shared.clone());
        let (seen, sub) = recorder(&switched);
        assert_eq!(switched.source_count(), 2);

        drop(sub);
        inner.set_value(6);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| recorder(&switched)));
        assert!(result.is_err());
        assert_eq!(switched.source_count(), 1, "only the selector stays registered");
        assert_eq!(inner.observer_count(), 0);
        assert_eq!(faulty.observer_count(), 0);
        assert_eq!(*seen.lock(), vec![5]);
    }

    #[test]
    fn test_distinct_until_changed() {
        let source = Live::with_value(1);
        let distinct = source.distinct_until_changed();
        let (seen, _sub) = recorder(&distinct);

        source.set_value(1);
        source.set_value(2);
        source.set_value(2);
        source.set_value(1);

        assert_eq!(*seen.lock(), vec![1, 2, 1]);
    }
}
