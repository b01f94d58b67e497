// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for live-combinators
//!
//! Provides the recording observer used by the integration tests and a
//! one-time tracing setup.
//!
//! # Design Principles
//! - Every observed emission is recorded, in delivery order
//! - Recorders own their subscription; dropping one detaches the observer
//! - Set `RUST_LOG=live_combinators=trace` to see the lifecycle of a test

#![allow(dead_code)]

use std::sync::{Arc, Once};

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use live_combinators::{Live, Subscription, Value};

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Observer that keeps every value it receives
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
    subscription: Subscription,
}

impl<T: Value> Recorder<T> {
    /// Attach a new recording observer to `live`
    pub fn attach(live: &Live<T>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = live.observe(move |value: &T| sink.lock().push(value.clone()));
        Self { seen, subscription }
    }

    /// All values received so far
    pub fn values(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    /// Most recent value, if any
    pub fn last(&self) -> Option<T> {
        self.seen.lock().last().cloned()
    }

    /// Number of values received so far
    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    /// Forget recorded values, keep observing
    pub fn clear(&self) {
        self.seen.lock().clear();
    }

    /// Detach the observer
    pub fn detach(self) {
        self.subscription.unsubscribe();
    }
}

/// Greeting used by the two-source scenarios
pub fn greeting(name: String, age: u32) -> String {
    format!("Hello {name}, you are {age}!")
}

/// Status line used by the four-source scenario
pub fn status_line(name: String, age: u32, country: String, sleeping: bool) -> String {
    let action = if sleeping { "wake up!" } else { "go to sleep!" };
    format!("{name} ({age}, {country}), {action} ")
}
