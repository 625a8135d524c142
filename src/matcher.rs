//! The matcher capability.
//!
//! A [`Matcher`] is a predicate over a [`Value`] that can also explain
//! itself: [`SelfDescribing::describe_to`] says what it expects, and
//! [`Matcher::describe_mismatch`] says why a given value is not it.
//!
//! Most matchers expect a particular type of value. Rather than downcasting
//! by hand, they implement one of the two typed traits of [`typed`] and are
//! wrapped in [`TypeSafe`] or [`TypeSafeDiagnosing`], which take care of null
//! and wrong-type inputs in one place.

pub mod typed;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::{all_of, any_of, AllOf, AnyOf, Description, SelfDescribing, Value};

pub use self::typed::{
    DiagnosingMatcher, Items, Of, TypeSafe, TypeSafeDiagnosing, TypeSafeMatcher, TypeTag, View,
};

/// A predicate over values that describes itself and its mismatches.
///
/// Matchers are immutable once built and may be shared between threads.
///
/// ## Contract
/// - [`Matcher::matches`] is a pure function of its argument.
/// - [`Matcher::describe_mismatch`] gives the right text whether or not
///   `matches` was called before, and never panics, whatever the value.
/// - Neither mutates the value under test.
pub trait Matcher: SelfDescribing + Send + Sync {
    /// Whether `actual` satisfies the matcher.
    fn matches(&self, actual: &dyn Value) -> bool;

    /// Explain why `actual` does not satisfy the matcher.
    ///
    /// Only meaningful when `matches(actual)` is false.
    fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
        mismatch.append_text("was ").append_value(actual);
    }
}

/// A matcher of any type, as stored in heterogeneous matcher lists.
pub type BoxedMatcher = Box<dyn Matcher>;

impl fmt::Debug for dyn Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&Description::of(self)).finish()
    }
}

macro_rules! forward_matcher {
    ($($ptr:ty),*) => {
        $(
            impl<M: SelfDescribing + ?Sized> SelfDescribing for $ptr {
                fn describe_to(&self, description: &mut Description) {
                    (**self).describe_to(description)
                }
            }

            impl<M: Matcher + ?Sized> Matcher for $ptr {
                fn matches(&self, actual: &dyn Value) -> bool {
                    (**self).matches(actual)
                }

                fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
                    (**self).describe_mismatch(actual, mismatch)
                }
            }
        )*
    };
}

forward_matcher!(&M, Box<M>, Arc<M>);

/// Convenience methods available on every matcher.
pub trait MatcherExt: Matcher + Sized + 'static {
    /// Box the matcher, to mix it with matchers of other types.
    fn boxed(self) -> BoxedMatcher {
        Box::new(self)
    }

    /// Match values satisfying both `self` and `other`.
    fn and(self, other: impl Matcher + 'static) -> AllOf {
        all_of([self.boxed(), other.boxed()])
    }

    /// Match values satisfying `self` or `other`.
    fn or(self, other: impl Matcher + 'static) -> AnyOf {
        any_of([self.boxed(), other.boxed()])
    }
}

impl<M: Matcher + 'static> MatcherExt for M {}

/// Box every matcher of `matchers`, preserving order.
pub(crate) fn boxed_all<M: Matcher + 'static>(
    matchers: impl IntoIterator<Item = M>,
) -> Vec<BoxedMatcher> {
    matchers.into_iter().map(MatcherExt::boxed).collect()
}

/// Errors that occur when constructing matchers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidMatcher {
    /// A parallel-runs matcher was asked for zero runs
    #[error("Expected at least one run, got 0")]
    NoRuns,

    /// The matcher needs at least one element matcher
    #[error("{matcher} needs at least one element matcher")]
    NoElementMatchers {
        /// The name of the matcher being constructed
        matcher: &'static str,
    },

    /// A feature matcher was given an empty feature name
    #[error("Feature name must not be empty")]
    EmptyFeatureName,
}
