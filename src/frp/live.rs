// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live - Observable single-value container
//!
//! A `Live<T>` holds at most one current value and pushes every change to
//! its observers. Derived live values plug into upstream *sources* only
//! while they are observed themselves.
//!
//! # Lifecycle
//!
//! ```text
//! Unsubscribed ──first observer──> SubscribedNoValue ──set_value──> SubscribedHasValue
//!      ^                                   │                               │ ↺ set_value
//!      └──────────────last observer gone───┴───────────────────────────────┘
//! ```
//!
//! Going active plugs every registered source; going inactive unplugs all of
//! them in the same turn. Derived values also drop their value at that point
//! (see [`LiveConfig::retain_when_inactive`]).
//!
//! # Delivery
//!
//! Delivery is synchronous on the thread calling [`Live::set_value`] and is
//! serialized per live value: a value set while a dispatch is running (from
//! an observer or another thread) is stored and the running dispatch restarts
//! with the latest value. No internal lock is held while an observer runs.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use live_combinators::frp::Live;
//!
//! let name = Live::with_value("Alice".to_string());
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let _subscription = name.observe(move |value| sink.lock().unwrap().push(value.clone()));
//! name.set_value("Bob".to_string());
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["Alice", "Bob"]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::signal::{Signal, SignalId, Value};
use super::subscription::Subscription;
use crate::config::LiveConfig;
use crate::errors::{LiveError, LiveResult};
use crate::state_machine::{ActivityInput, ActivityState, StateMachine};

/// Key of a source registered on a live value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

/// How long a source stays registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// Kept across deactivation and plugged again on the next activation
    Fixed,
    /// Forgotten on deactivation; owned by a switch stage
    Switched,
}

type Connect = Arc<dyn Fn() -> Subscription + Send + Sync>;

struct SourceEntry {
    id: SourceId,
    upstream: SignalId,
    kind: SourceKind,
    connect: Connect,
    plugged: Option<Subscription>,
}

#[derive(Default)]
struct SourceTable {
    entries: Vec<SourceEntry>,
    next_id: u64,
}

struct ObserverSlot<T> {
    id: u64,
    last_version: AtomicU64,
    detached: AtomicBool,
    on_change: Box<dyn Fn(&T) + Send + Sync>,
}

impl<T> ObserverSlot<T> {
    fn consider_notify(&self, value: &T, version: u64) {
        if self.detached.load(Ordering::SeqCst) {
            return;
        }
        if self.last_version.load(Ordering::SeqCst) >= version {
            return;
        }
        self.last_version.store(version, Ordering::SeqCst);
        (self.on_change)(value);
    }
}

struct State<T> {
    value: Option<T>,
    version: u64,
    observers: Vec<Arc<ObserverSlot<T>>>,
    next_observer: u64,
    dispatching: bool,
    invalidated: bool,
    activity: ActivityState,
}

struct Shared<T> {
    id: SignalId,
    config: LiveConfig,
    state: Mutex<State<T>>,
    sources: Mutex<SourceTable>,
}

/// Resets the dispatching flag if an observer panics mid-dispatch
struct DispatchGuard<'a, T> {
    state: &'a Mutex<State<T>>,
    armed: bool,
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock();
            state.dispatching = false;
            state.invalidated = false;
        }
    }
}

/// Forgets a source whose first connection unwound
struct PendingSource<'a, T: Value> {
    live: &'a Live<T>,
    id: SourceId,
    armed: bool,
}

impl<T: Value> Drop for PendingSource<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.live.remove_source(self.id);
        }
    }
}

/// Observable single-value container
///
/// Cloning a `Live<T>` yields another handle to the same value.
pub struct Live<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Non-owning handle used by source callbacks to reach their target
pub(crate) struct WeakLive<T> {
    shared: Weak<Shared<T>>,
}

impl<T> WeakLive<T> {
    pub(crate) fn upgrade(&self) -> Option<Live<T>> {
        self.shared.upgrade().map(|shared| Live { shared })
    }
}

impl<T: Value> Live<T> {
    /// Create an empty live value
    pub fn new() -> Self {
        Self::from_config(LiveConfig::default())
    }

    /// Create a live value holding `value` from the start
    pub fn with_value(value: T) -> Self {
        let live = Self::new();
        {
            let mut state = live.shared.state.lock();
            state.value = Some(value);
            state.version = 1;
        }
        live
    }

    /// Create an empty live value with an explicit configuration
    pub fn with_config(config: LiveConfig) -> LiveResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Empty value configured for combinator output
    pub(crate) fn derived() -> Self {
        Self::from_config(LiveConfig::derived())
    }

    fn from_config(config: LiveConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: SignalId::next(),
                config,
                state: Mutex::new(State {
                    value: None,
                    version: 0,
                    observers: Vec::new(),
                    next_observer: 0,
                    dispatching: false,
                    invalidated: false,
                    activity: ActivityState::Unsubscribed,
                }),
                sources: Mutex::new(SourceTable::default()),
            }),
        }
    }

    /// Identity of this live value
    pub fn id(&self) -> SignalId {
        self.shared.id
    }

    /// Configuration this value was created with
    pub fn config(&self) -> &LiveConfig {
        &self.shared.config
    }

    /// Get the current value, `None` if nothing was set yet
    pub fn value(&self) -> Option<T> {
        self.shared.state.lock().value.clone()
    }

    /// Number of values set so far
    pub fn version(&self) -> u64 {
        self.shared.state.lock().version
    }

    /// Current lifecycle state
    pub fn state(&self) -> ActivityState {
        self.shared.state.lock().activity
    }

    /// Number of attached observers
    pub fn observer_count(&self) -> usize {
        self.shared.state.lock().observers.len()
    }

    /// Whether at least one observer is attached
    pub fn has_observers(&self) -> bool {
        self.observer_count() > 0
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.shared.sources.lock().entries.len()
    }

    /// Whether both handles point at the same live value
    pub fn ptr_eq(&self, other: &Live<T>) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Replace the current value and deliver it to every observer
    pub fn set_value(&self, value: T) {
        {
            let mut state = self.shared.state.lock();
            state.value = Some(value);
            state.version += 1;
            self.apply(&mut state, ActivityInput::Emit);
            trace!(
                live = %self.shared.config.name,
                id = %self.shared.id,
                version = state.version,
                "value set"
            );
        }
        self.dispatch();
    }

    /// Attach an observer
    ///
    /// The first observer activates the value, plugging it into its sources.
    /// With [`LiveConfig::replay_current`] set, a present value is delivered
    /// before this call returns.
    pub fn observe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let (observer_id, first) = {
            let mut state = self.shared.state.lock();
            let observer_id = state.next_observer;
            state.next_observer += 1;
            let seen = if self.shared.config.replay_current {
                0
            } else {
                state.version
            };
            state.observers.push(Arc::new(ObserverSlot {
                id: observer_id,
                last_version: AtomicU64::new(seen),
                detached: AtomicBool::new(false),
                on_change: Box::new(on_change),
            }));
            (observer_id, state.observers.len() == 1)
        };
        // Must exist before user code runs: unwinding drops it and detaches.
        let live = self.clone();
        let subscription = Subscription::new(move || live.detach(observer_id));

        if first {
            self.activate();
        }
        if self.shared.config.replay_current {
            self.dispatch();
        }
        subscription
    }

    /// Register `source` so that `on_change` runs for its values while this
    /// value is observed
    ///
    /// # Errors
    ///
    /// [`LiveError::SourceAlreadyAdded`] if `source` is already registered.
    pub fn add_source<U, S, F>(&self, source: &S, on_change: F) -> LiveResult<SourceId>
    where
        U: Value,
        S: Signal<U>,
        F: Fn(&U) + Send + Sync + 'static,
    {
        let upstream = source.signal_id();
        let duplicate = self
            .shared
            .sources
            .lock()
            .entries
            .iter()
            .any(|entry| entry.upstream == upstream);
        if duplicate {
            return Err(LiveError::SourceAlreadyAdded {
                target: self.shared.id,
                upstream,
            });
        }
        Ok(self.attach_source(source, SourceKind::Fixed, on_change))
    }

    /// Unplug and forget a source. Returns `false` for unknown ids.
    pub fn remove_source(&self, id: SourceId) -> bool {
        let removed = {
            let mut sources = self.shared.sources.lock();
            sources
                .entries
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| sources.entries.remove(index))
        };

        match removed {
            Some(entry) => {
                trace!(
                    live = %self.shared.config.name,
                    id = %self.shared.id,
                    source = %entry.upstream,
                    "source removed"
                );
                // Dropping the entry releases its upstream subscription.
                drop(entry);
                true
            }
            None => false,
        }
    }

    pub(crate) fn has_source(&self, id: SourceId) -> bool {
        self.shared
            .sources
            .lock()
            .entries
            .iter()
            .any(|entry| entry.id == id)
    }

    pub(crate) fn downgrade(&self) -> WeakLive<T> {
        WeakLive {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Register a source without the duplicate check
    pub(crate) fn attach_source<U, S, F>(&self, source: &S, kind: SourceKind, on_change: F) -> SourceId
    where
        U: Value,
        S: Signal<U>,
        F: Fn(&U) + Send + Sync + 'static,
    {
        let upstream = source.signal_id();
        let on_change = Arc::new(on_change);
        let connect: Connect = {
            let source = source.clone();
            Arc::new(move || {
                let on_change = Arc::clone(&on_change);
                source.observe(move |value: &U| on_change(value))
            })
        };

        let id = {
            let mut sources = self.shared.sources.lock();
            let id = SourceId(sources.next_id);
            sources.next_id += 1;
            sources.entries.push(SourceEntry {
                id,
                upstream,
                kind,
                connect: Arc::clone(&connect),
                plugged: None,
            });
            id
        };
        trace!(
            live = %self.shared.config.name,
            id = %self.shared.id,
            source = %upstream,
            ?kind,
            "source attached"
        );

        if self.has_observers() {
            let mut pending = PendingSource {
                live: self,
                id,
                armed: true,
            };
            let subscription = connect();
            pending.armed = false;
            self.store_plug(id, subscription);
        }
        id
    }

    fn apply(&self, state: &mut State<T>, input: ActivityInput) {
        match state.activity.transition(&input) {
            Ok((next, ())) => {
                if next != state.activity {
                    debug!(
                        live = %self.shared.config.name,
                        id = %self.shared.id,
                        from = %state.activity,
                        to = %next,
                        "activity changed"
                    );
                }
                state.activity = next;
            }
            Err(error) => warn!(
                live = %self.shared.config.name,
                id = %self.shared.id,
                %error,
                "ignored lifecycle transition"
            ),
        }
    }

    fn dispatch(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.dispatching {
                state.invalidated = true;
                return;
            }
            state.dispatching = true;
        }
        let mut guard = DispatchGuard {
            state: &self.shared.state,
            armed: true,
        };

        loop {
            let (value, version, observers) = {
                let mut state = self.shared.state.lock();
                state.invalidated = false;
                (state.value.clone(), state.version, state.observers.clone())
            };

            if let Some(value) = value {
                for slot in &observers {
                    if self.shared.state.lock().invalidated {
                        break;
                    }
                    slot.consider_notify(&value, version);
                }
            }

            let mut state = self.shared.state.lock();
            if !state.invalidated {
                state.dispatching = false;
                guard.armed = false;
                break;
            }
        }
    }

    fn detach(&self, observer_id: u64) {
        let last = {
            let mut state = self.shared.state.lock();
            let before = state.observers.len();
            state.observers.retain(|slot| {
                if slot.id == observer_id {
                    slot.detached.store(true, Ordering::SeqCst);
                    false
                } else {
                    true
                }
            });
            before != state.observers.len() && state.observers.is_empty()
        };

        if last {
            self.deactivate();
        }
    }

    fn activate(&self) {
        {
            let mut state = self.shared.state.lock();
            let has_value = state.value.is_some();
            self.apply(&mut state, ActivityInput::Activate { has_value });
        }
        self.plug_sources();
    }

    fn deactivate(&self) {
        let unplugged = {
            let mut sources = self.shared.sources.lock();
            let mut state = self.shared.state.lock();
            // Someone attached again before we got here.
            if !state.observers.is_empty() {
                return;
            }

            let mut unplugged = Vec::new();
            sources.entries.retain_mut(|entry| {
                if let Some(subscription) = entry.plugged.take() {
                    unplugged.push(subscription);
                }
                entry.kind == SourceKind::Fixed
            });

            self.apply(&mut state, ActivityInput::Deactivate);
            if !self.shared.config.retain_when_inactive {
                state.value = None;
            }
            unplugged
        };

        debug!(
            live = %self.shared.config.name,
            id = %self.shared.id,
            released = unplugged.len(),
            "unplugged sources"
        );
        drop(unplugged);
    }

    fn plug_sources(&self) {
        let pending: Vec<(SourceId, Connect)> = self
            .shared
            .sources
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.plugged.is_none())
            .map(|entry| (entry.id, Arc::clone(&entry.connect)))
            .collect();

        for (id, connect) in pending {
            // An earlier source may have removed or plugged this one already.
            let still_pending = self
                .shared
                .sources
                .lock()
                .entries
                .iter()
                .any(|entry| entry.id == id && entry.plugged.is_none());
            if !still_pending {
                continue;
            }
            let subscription = connect();
            self.store_plug(id, subscription);
        }
    }

    fn store_plug(&self, id: SourceId, subscription: Subscription) {
        let rejected = {
            let mut sources = self.shared.sources.lock();
            let active = !self.shared.state.lock().observers.is_empty();
            match sources.entries.iter_mut().find(|entry| entry.id == id) {
                Some(entry) if active && entry.plugged.is_none() => {
                    entry.plugged = Some(subscription);
                    None
                }
                _ => Some(subscription),
            }
        };
        drop(rejected);
    }
}

impl<T: Value> Default for Live<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Value> Signal<T> for Live<T> {
    fn value(&self) -> Option<T> {
        Live::value(self)
    }

    fn observe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Live::observe(self, on_change)
    }

    fn signal_id(&self) -> SignalId {
        self.shared.id
    }
}

impl<T> fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Live")
            .field("id", &self.shared.id)
            .field("name", &self.shared.config.name)
            .field("version", &state.version)
            .field("observers", &state.observers.len())
            .field("activity", &state.activity)
            .finish()
    }
}
