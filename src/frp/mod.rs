// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live Values and Their Combinators
//!
//! This module provides observable single-value containers and the
//! combinators that derive new values from them.
//!
//! # Core Concepts
//!
//! ## Signal<T>
//!
//! Boundary contract for an observable value: read the current value,
//! attach an observer, get a [`Subscription`] back. All combinators are
//! written against this contract.
//!
//! ## Live<T>
//!
//! The shipped implementation. A `Live<T>` holds at most one value and is
//! either observed (active) or not. Derived values are plugged into their
//! sources only while active:
//!
//! ```text
//!  name ──┐
//!         ├─ switch_map ── map ── greeting ──> observer
//!  age  ──┘
//!
//!  no observer on `greeting` => nothing above it is subscribed
//! ```
//!
//! ## Combinators
//!
//! - `map` - one source, one function
//! - `switch_map` - follow whichever live value a source currently selects
//! - `derive_from`, `map2` .. `map6` - combine 2 to 6 sources
//!
//! # Guarantees
//!
//! A derived value only ever emits results computed from the latest value of
//! every source. It emits nothing until every source has a value. Removing
//! its last observer releases every upstream subscription in the same call.
//!
//! # Example
//!
//! ```rust
//! use live_combinators::frp::{map4, Live};
//!
//! let name = Live::with_value("Sam".to_string());
//! let age = Live::with_value(5);
//! let country = Live::with_value("UK".to_string());
//! let sleeping = Live::with_value(false);
//!
//! let status = map4(&name, &age, &country, &sleeping, |name, age, country, sleeping| {
//!     let action = if sleeping { "wake up!" } else { "go to sleep!" };
//!     format!("{name} ({age}, {country}), {action} ")
//! });
//!
//! let _sub = status.observe(|_| {});
//! assert_eq!(status.value().as_deref(), Some("Sam (5, UK), go to sleep! "));
//!
//! sleeping.set_value(true);
//! assert_eq!(status.value().as_deref(), Some("Sam (5, UK), wake up! "));
//! ```

pub mod combinators;
pub mod live;
pub mod signal;
pub mod subscription;

mod curry;
mod operators;

pub use combinators::*;
pub use curry::Transform;
pub use live::{Live, SourceId};
pub use signal::{Signal, SignalId, Value};
pub use subscription::Subscription;
