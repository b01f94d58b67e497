// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscription handles
//!
//! A [`Subscription`] owns the registration of one observer. Releasing it,
//! either explicitly or by dropping the handle, detaches the observer
//! before the next delivery.

use std::fmt;

use parking_lot::Mutex;

type Release = Box<dyn FnOnce() + Send>;

/// RAII handle for an attached observer
///
/// # Invariants
///
/// 1. `unsubscribe()` runs the release action at most once.
/// 2. Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription detaches the observer immediately"]
pub struct Subscription {
    release: Mutex<Option<Release>>,
}

impl Subscription {
    /// Create a handle that runs `release` when unsubscribed
    pub(crate) fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Mutex::new(Some(Box::new(release))),
        }
    }

    /// Detach the observer. Calling this more than once has no effect.
    pub fn unsubscribe(&self) {
        let release = self.release.lock().take();
        if let Some(release) = release {
            release();
        }
    }

    /// Whether the observer is still attached through this handle
    pub fn is_active(&self) -> bool {
        self.release.lock().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
