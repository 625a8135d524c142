#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod assertion;
mod combinator;
mod description;
mod leaf;
pub mod matcher;
mod sequence;
pub mod value;

pub use assertion::{
    assert_that, assert_that_with_reason, assert_true, assume_that, check_that, Asserter,
    AssertionError, CheckId, FailStrategy, PanicStrategy, SoftAssertions,
};
pub use combinator::{
    all_of, any_of, are, described_as, is, not, AllOf, AnyOf, Are, DescribedAs, Is, Not,
};
pub use description::{Description, SelfDescribing};
pub use leaf::{
    anything, equal_to, has_feature, instance_of, not_null, null_value, Anything, Feature,
    FeatureError, InstanceOf, IsEqual, IsNull,
};
pub use matcher::{BoxedMatcher, InvalidMatcher, Matcher, MatcherExt, TypeSafeMatcher};
pub use sequence::{
    contains, contains_any_of, contains_any_of_matchers, contains_in_any_order,
    contains_in_any_order_matchers, contains_in_relative_order,
    contains_in_relative_order_matchers, contains_matchers, contains_parallel_runs_of,
    contains_parallel_runs_of_matchers, empty_iterable, every_item, has_item, has_items,
    iterable_with_size, iterable_with_size_of, EmptyIterable, EveryItem, HasItem, InAnyOrder,
    InOrder, InRelativeOrder, Intersects, IterableWithSize, ParallelRuns,
};
pub use value::{Null, Value};
