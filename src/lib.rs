// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lifecycle-aware live values and combinators
//!
//! This crate provides an observable single-value container ([`Live`]) and
//! combinators that derive new live values from up to six others. Derived
//! values subscribe to their sources only while they are observed, and never
//! emit a result computed from a stale source value.
//!
//! - [`frp`] - live values, the signal contract and the combinators
//! - [`state_machine`] - the activity lifecycle of a live value
//! - [`config`] - per-value configuration
//! - [`errors`] - error types

pub mod config;
pub mod errors;
pub mod frp;
pub mod state_machine;

// Re-export commonly used types
pub use config::LiveConfig;
pub use errors::{LiveError, LiveResult};
pub use frp::{
    derive_from, distinct_until_changed, map, map2, map3, map4, map5, map6, switch_map, Followers,
    Live, Signal, SignalId, SourceId, Sources, Subscription, Transform, Value,
};
pub use state_machine::{ActivityInput, ActivityState};
