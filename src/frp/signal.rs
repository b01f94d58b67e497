// Copyright (c) 2025 - Cowboy AI, Inc.
//! Signal Trait - Boundary contract for observable values
//!
//! A `Signal<T>` is anything that holds a current value and notifies
//! observers when it changes. The combinators never reach past this
//! contract: they read the current value, attach observers and release the
//! returned [`Subscription`] handles.
//!
//! # Contract
//!
//! | Operation | Requirement |
//! |---|---|
//! | `value()` | last delivered value, `None` if nothing was delivered yet |
//! | `observe(f)` | `f` runs synchronously for every later value (and possibly the current one) |
//! | `Subscription::unsubscribe()` | idempotent, releases immediately |
//! | `signal_id()` | stable identity, used to detect duplicate sources |
//!
//! [`Live<T>`](super::Live) is the implementation shipped with this crate.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::subscription::Subscription;

/// Bound shared by every value that travels through a live value
///
/// Values are cloned out of their container on delivery, and delivery may
/// happen on any thread that sets a value.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}

/// Process-unique identity of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

impl SignalId {
    /// Allocate a fresh identity
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SignalId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric form of the identity
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable single-value container
///
/// # Type Parameters
///
/// - `T`: The type of value the signal carries
pub trait Signal<T: Value>: Clone + Send + Sync + 'static {
    /// Get the last delivered value, if any
    fn value(&self) -> Option<T>;

    /// Attach an observer
    ///
    /// The observer stays attached until the returned handle is
    /// unsubscribed or dropped.
    fn observe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static;

    /// Identity of this signal
    fn signal_id(&self) -> SignalId;
}
