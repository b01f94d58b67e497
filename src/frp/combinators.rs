// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live Value Combinators
//!
//! This module derives one live value from several. All combinators are
//! pure constructors: nothing is subscribed until the result is observed.
//!
//! # Available Combinators
//!
//! - `map` - Transform one live value
//! - `switch_map` - Follow the live value selected by another one
//! - `map2` .. `map6` - Combine 2 to 6 live values with an n-ary function
//! - `derive_from` - Combine a tuple of live values with a tupled function
//! - `distinct_until_changed` - Drop repeated values
//! - `Live::map_with` - Method form for 2 to 6 sources
//!
//! # How N-ary Derivation Works
//!
//! Combining `(a, b, c)` with `f` is a chain of switch stages ending in a
//! plain map:
//!
//! ```text
//! switch_map(a, |va|
//!     switch_map(b, |vb|
//!         map(c, |vc| f(va, vb, vc))))
//! ```
//!
//! Each stage binds the value it received to the front of the transform and
//! hands the shorter transform to the rest of the tuple. Any emission of a
//! source rebuilds everything after it in argument order, so the result
//! always reflects the latest value of every source. The last stage has no
//! further sources and stays a cheap map.
//!
//! # Examples
//!
//! ```rust
//! use live_combinators::frp::{combinators::map2, Live};
//!
//! let name = Live::with_value("Alice".to_string());
//! let age = Live::with_value(30);
//! let greeting = map2(&name, &age, |name, age| format!("Hello {name}, you are {age}!"));
//!
//! let _sub = greeting.observe(|_| {});
//! assert_eq!(greeting.value().as_deref(), Some("Hello Alice, you are 30!"));
//!
//! name.set_value("Bob".to_string());
//! assert_eq!(greeting.value().as_deref(), Some("Hello Bob, you are 30!"));
//! ```

use std::sync::Arc;

use super::curry::{self, Transform};
use super::live::Live;
use super::signal::Value;

/// A tuple of live values that can be combined into one
///
/// Implemented for `(Live<A>,)` up to `(Live<A>, .., Live<F>)`. The
/// single-element tuple is the `map` base case; every longer tuple switches
/// over its first element and derives from the rest.
pub trait Sources: Send + Sync + 'static {
    /// Tuple of the current values, in source order
    type Values: Send + 'static;

    /// Derive a live value from all sources
    fn derive<R: Value>(&self, transform: Transform<Self::Values, R>) -> Live<R>;
}

impl<A: Value> Sources for (Live<A>,) {
    type Values = (A,);

    fn derive<R: Value>(&self, transform: Transform<Self::Values, R>) -> Live<R> {
        self.0.map(move |a| transform((a,)))
    }
}

macro_rules! switched_sources {
    ($H:ident $h:ident; $($T:ident $t:ident),+) => {
        impl<$H: Value, $($T: Value),+> Sources for (Live<$H>, $(Live<$T>),+) {
            type Values = ($H, $($T),+);

            fn derive<R: Value>(&self, transform: Transform<Self::Values, R>) -> Live<R> {
                let ($h, $($t),+) = self;
                let rest = ($($t.clone(),)+);
                $h.switch_map(move |head: $H| {
                    rest.derive(curry::bind::<$H, ($($T,)+), R>(Arc::clone(&transform), head))
                })
            }
        }
    };
}

switched_sources!(A a; B b);
switched_sources!(A a; B b, C c);
switched_sources!(A a; B b, C c, D d);
switched_sources!(A a; B b, C c, D d, E e);
switched_sources!(A a; B b, C c, D d, E e, F f);

/// Combine a tuple of live values with a transform over the tuple of their
/// values
///
/// # Examples
///
/// ```rust
/// use live_combinators::frp::{combinators::derive_from, Live};
///
/// let width = Live::with_value(3);
/// let height = Live::with_value(4);
/// let area = derive_from((width, height), |(w, h): (i32, i32)| w * h);
///
/// let _sub = area.observe(|_| {});
/// assert_eq!(area.value(), Some(12));
/// ```
pub fn derive_from<S, R, F>(sources: S, transform: F) -> Live<R>
where
    S: Sources,
    R: Value,
    F: Fn(S::Values) -> R + Send + Sync + 'static,
{
    sources.derive(Arc::new(transform))
}

/// Transform one live value
///
/// Free-function form of [`Live::map`].
pub fn map<A, R, F>(source: &Live<A>, transform: F) -> Live<R>
where
    A: Value,
    R: Value,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    source.map(transform)
}

/// Follow the live value selected by `source`
///
/// Free-function form of [`Live::switch_map`].
pub fn switch_map<A, R, F>(source: &Live<A>, switch: F) -> Live<R>
where
    A: Value,
    R: Value,
    F: Fn(A) -> Live<R> + Send + Sync + 'static,
{
    source.switch_map(switch)
}

/// Forward a value of `source` only when it differs from the last one
///
/// Free-function form of [`Live::distinct_until_changed`].
pub fn distinct_until_changed<T>(source: &Live<T>) -> Live<T>
where
    T: Value + PartialEq,
{
    source.distinct_until_changed()
}

macro_rules! fixed_arity_map {
    ($(#[$doc:meta])* $name:ident => $($T:ident $s:ident),+) => {
        $(#[$doc])*
        pub fn $name<$($T,)+ R, F>($($s: &Live<$T>,)+ transform: F) -> Live<R>
        where
            $($T: Value,)+
            R: Value,
            F: Fn($($T),+) -> R + Send + Sync + 'static,
        {
            ($($s.clone(),)+).derive(Arc::new(move |($($s,)+): ($($T,)+)| transform($($s),+)))
        }
    };
}

fixed_arity_map!(
    /// Combine two live values
    map2 => A a, B b
);
fixed_arity_map!(
    /// Combine three live values
    map3 => A a, B b, C c
);
fixed_arity_map!(
    /// Combine four live values
    map4 => A a, B b, C c, D d
);
fixed_arity_map!(
    /// Combine five live values
    map5 => A a, B b, C c, D d, E e
);
fixed_arity_map!(
    /// Combine six live values
    map6 => A a, B b, C c, D d, E e, G g
);

/// Live values that can follow a leading live value of type `H`
///
/// Implemented for a single `Live<B>` and for tuples of 1 to 5 live values,
/// so that [`Live::map_with`] covers 2 to 6 sources.
pub trait Followers<H: Value> {
    /// The full source tuple with `H` in front
    type Combined: Sources;

    /// Put `head` in front of these live values
    fn after(&self, head: &Live<H>) -> Self::Combined;
}

impl<H: Value, B: Value> Followers<H> for Live<B> {
    type Combined = (Live<H>, Live<B>);

    fn after(&self, head: &Live<H>) -> Self::Combined {
        (head.clone(), self.clone())
    }
}

macro_rules! followers_tuple {
    ($($T:ident $t:ident),+) => {
        impl<H: Value, $($T: Value),+> Followers<H> for ($(Live<$T>,)+) {
            type Combined = (Live<H>, $(Live<$T>),+);

            fn after(&self, head: &Live<H>) -> Self::Combined {
                let ($($t,)+) = self;
                (head.clone(), $($t.clone()),+)
            }
        }
    };
}

followers_tuple!(B b);
followers_tuple!(B b, C c);
followers_tuple!(B b, C c, D d);
followers_tuple!(B b, C c, D d, E e);
followers_tuple!(B b, C c, D d, E e, F f);

impl<T: Value> Live<T> {
    /// Combine this live value with `others`
    ///
    /// `others` is one live value or a tuple of up to five. `self` is the
    /// outer (switching) source and comes first in the transform's tuple.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use live_combinators::frp::Live;
    ///
    /// let name = Live::with_value("Sam".to_string());
    /// let age = Live::with_value(5);
    /// let country = Live::with_value("UK".to_string());
    ///
    /// let label = name.map_with((age, country), |(name, age, country): (String, i32, String)| {
    ///     format!("{name} ({age}, {country})")
    /// });
    ///
    /// let _sub = label.observe(|_| {});
    /// assert_eq!(label.value().as_deref(), Some("Sam (5, UK)"));
    /// ```
    pub fn map_with<S, R, F>(&self, others: S, transform: F) -> Live<R>
    where
        S: Followers<T>,
        R: Value,
        F: Fn(<S::Combined as Sources>::Values) -> R + Send + Sync + 'static,
    {
        others.after(self).derive(Arc::new(transform))
    }
}
