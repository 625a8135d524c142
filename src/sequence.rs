//! Matchers over sequences.
//!
//! Given an observed sequence and an ordered list of element matchers, the
//! matchers of this module decide a match under one of five disciplines:
//!
//!  - [`contains`]: the items match the matchers one to one, in order;
//!  - [`contains_in_any_order`]: the items match the matchers one to one, in
//!    any order. Each item greedily consumes the first unused matcher that
//!    accepts it, so a valid assignment may exist that is not found;
//!  - [`contains_in_relative_order`]: the matchers match a subsequence of the
//!    items, in order, with arbitrary items in between;
//!  - [`contains_parallel_runs_of`]: `k` disjoint, interleaved subsequences of
//!    the items each match the matchers in order;
//!  - [`contains_any_of`]: at least one matcher accepts at least one item.
//!
//! Each discipline has a literal form, wrapping the given values in
//! [`equal_to`], and a `_matchers` form taking arbitrary element matchers.
//!
//! [`has_item`], [`has_items`], [`every_item`], [`iterable_with_size`] and
//! [`empty_iterable`] complete the family.
//!
//! All of these accept any collection [`Value`] (see [`Items`](crate::matcher::Items)). A null or
//! non-collection value is reported by the common type-safe dispatch, as
//! `was null` or `was a <type> (<value>)`.

mod any_order;
mod in_order;
mod intersection;
mod items;
mod parallel_runs;
mod relative_order;

use crate::matcher::{boxed_all, InvalidMatcher, TypeSafe, TypeSafeDiagnosing};
use crate::{all_of, equal_to, AllOf, BoxedMatcher, Matcher, MatcherExt, Value};

pub use self::any_order::InAnyOrder;
pub use self::in_order::InOrder;
pub use self::intersection::Intersects;
pub use self::items::{EmptyIterable, EveryItem, HasItem, IterableWithSize};
pub use self::parallel_runs::ParallelRuns;
pub use self::relative_order::InRelativeOrder;

/// Wrap each value in an [`equal_to`] matcher.
fn equal_to_each<T>(values: impl IntoIterator<Item = T>) -> Vec<BoxedMatcher>
where
    T: Value + PartialEq + Send + Sync,
{
    values.into_iter().map(|v| equal_to(v).boxed()).collect()
}

/// Match sequences whose items equal `values`, in order.
pub fn contains<T>(values: impl IntoIterator<Item = T>) -> TypeSafeDiagnosing<InOrder>
where
    T: Value + PartialEq + Send + Sync,
{
    TypeSafeDiagnosing(InOrder::new(equal_to_each(values)))
}

/// Match sequences whose items satisfy `matchers`, one to one, in order.
pub fn contains_matchers<M: Matcher + 'static>(
    matchers: impl IntoIterator<Item = M>,
) -> TypeSafeDiagnosing<InOrder> {
    TypeSafeDiagnosing(InOrder::new(boxed_all(matchers)))
}

/// Match sequences whose items equal `values`, in any order.
pub fn contains_in_any_order<T>(values: impl IntoIterator<Item = T>) -> TypeSafeDiagnosing<InAnyOrder>
where
    T: Value + PartialEq + Send + Sync,
{
    TypeSafeDiagnosing(InAnyOrder::new(equal_to_each(values)))
}

/// Match sequences whose items satisfy `matchers`, one to one, in any order.
///
/// Matching is greedy: each item consumes the first still-unused matcher, in
/// declaration order, that accepts it.
pub fn contains_in_any_order_matchers<M: Matcher + 'static>(
    matchers: impl IntoIterator<Item = M>,
) -> TypeSafeDiagnosing<InAnyOrder> {
    TypeSafeDiagnosing(InAnyOrder::new(boxed_all(matchers)))
}

/// Match sequences containing `values` in order, not necessarily
/// contiguously.
pub fn contains_in_relative_order<T>(
    values: impl IntoIterator<Item = T>,
) -> TypeSafeDiagnosing<InRelativeOrder>
where
    T: Value + PartialEq + Send + Sync,
{
    TypeSafeDiagnosing(InRelativeOrder::new(equal_to_each(values)))
}

/// Match sequences with a subsequence satisfying `matchers` in order.
pub fn contains_in_relative_order_matchers<M: Matcher + 'static>(
    matchers: impl IntoIterator<Item = M>,
) -> TypeSafeDiagnosing<InRelativeOrder> {
    TypeSafeDiagnosing(InRelativeOrder::new(boxed_all(matchers)))
}

/// Match sequences made of `runs` interleaved runs of `values`.
///
/// Returns an error if `runs` is zero.
pub fn contains_parallel_runs_of<T>(
    runs: usize,
    values: impl IntoIterator<Item = T>,
) -> Result<TypeSafeDiagnosing<ParallelRuns>, InvalidMatcher>
where
    T: Value + PartialEq + Send + Sync,
{
    ParallelRuns::try_new(runs, equal_to_each(values)).map(TypeSafeDiagnosing)
}

/// Match sequences with `runs` disjoint subsequences, each satisfying
/// `matchers` in order.
///
/// Returns an error if `runs` is zero.
pub fn contains_parallel_runs_of_matchers<M: Matcher + 'static>(
    runs: usize,
    matchers: impl IntoIterator<Item = M>,
) -> Result<TypeSafeDiagnosing<ParallelRuns>, InvalidMatcher> {
    ParallelRuns::try_new(runs, boxed_all(matchers)).map(TypeSafeDiagnosing)
}

/// Match sequences containing at least one of `values`.
///
/// Returns an error if `values` is empty.
pub fn contains_any_of<T>(
    values: impl IntoIterator<Item = T>,
) -> Result<TypeSafeDiagnosing<Intersects>, InvalidMatcher>
where
    T: Value + PartialEq + Send + Sync,
{
    Intersects::try_new(equal_to_each(values)).map(TypeSafeDiagnosing)
}

/// Match sequences with at least one item satisfying one of `matchers`.
///
/// Returns an error if `matchers` is empty.
pub fn contains_any_of_matchers<M: Matcher + 'static>(
    matchers: impl IntoIterator<Item = M>,
) -> Result<TypeSafeDiagnosing<Intersects>, InvalidMatcher> {
    Intersects::try_new(boxed_all(matchers)).map(TypeSafeDiagnosing)
}

/// Match sequences with at least one item satisfying `matcher`.
pub fn has_item(matcher: impl Matcher + 'static) -> TypeSafeDiagnosing<HasItem> {
    TypeSafeDiagnosing(HasItem::new(matcher.boxed()))
}

/// Match sequences in which each of `matchers` is satisfied by some item.
///
/// Items may satisfy more than one matcher.
pub fn has_items<M: Matcher + 'static>(matchers: impl IntoIterator<Item = M>) -> AllOf {
    all_of(matchers.into_iter().map(|m| has_item(m)))
}

/// Match sequences whose items all satisfy `matcher`.
pub fn every_item(matcher: impl Matcher + 'static) -> TypeSafeDiagnosing<EveryItem> {
    TypeSafeDiagnosing(EveryItem::new(matcher.boxed()))
}

/// Match sequences whose length satisfies `size`.
///
/// The length is matched as a `usize`: `equal_to(2)` compares with an `i32`
/// and never matches. Write `equal_to(2usize)` or use
/// [`iterable_with_size_of`].
pub fn iterable_with_size(size: impl Matcher + 'static) -> TypeSafeDiagnosing<IterableWithSize> {
    TypeSafeDiagnosing(IterableWithSize::new(size.boxed()))
}

/// Match sequences of exactly `size` items.
pub fn iterable_with_size_of(size: usize) -> TypeSafeDiagnosing<IterableWithSize> {
    iterable_with_size(equal_to(size))
}

/// Match empty sequences.
pub fn empty_iterable() -> TypeSafe<EmptyIterable> {
    TypeSafe(EmptyIterable)
}
