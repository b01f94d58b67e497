// Copyright (c) 2025 - Cowboy AI, Inc.
//! Partial application of tupled transforms
//!
//! Inside the combinator chain an n-ary transform travels in tupled form,
//! `Fn((A, B, C)) -> R`. [`bind`] fixes the first argument and returns the
//! (n-1)-ary remainder `Fn((B, C)) -> R`. This is only needed to peel one
//! source value off the front of a transform, so it stays private to the
//! crate.

use std::sync::Arc;

/// Shared transform taking its arguments as one tuple
pub type Transform<Args, R> = Arc<dyn Fn(Args) -> R + Send + Sync>;

/// A tuple that can grow by one element at the front
pub(crate) trait Prepend<H> {
    /// The tuple with `H` in front
    type Output;

    fn prepend(self, head: H) -> Self::Output;
}

macro_rules! prepend_tuple {
    ($($T:ident $t:ident),+) => {
        impl<H, $($T),+> Prepend<H> for ($($T,)+) {
            type Output = (H, $($T),+);

            fn prepend(self, head: H) -> Self::Output {
                let ($($t,)+) = self;
                (head, $($t),+)
            }
        }
    };
}

prepend_tuple!(A a);
prepend_tuple!(A a, B b);
prepend_tuple!(A a, B b, C c);
prepend_tuple!(A a, B b, C c, D d);
prepend_tuple!(A a, B b, C c, D d, E e);

/// Fix the first argument of `transform`
///
/// `bind(f, t)(rest)` is `f((t, rest..))`. `first` is cloned on every call
/// because the returned transform runs once per upstream emission.
pub(crate) fn bind<T, Rest, R>(
    transform: Transform<<Rest as Prepend<T>>::Output, R>,
    first: T,
) -> Transform<Rest, R>
where
    T: Clone + Send + Sync + 'static,
    Rest: Prepend<T> + 'static,
    <Rest as Prepend<T>>::Output: 'static,
    R: 'static,
{
    Arc::new(move |rest: Rest| transform(rest.prepend(first.clone())))
}
