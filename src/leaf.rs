//! Leaf matchers.
//!
//! The sequence engine and the combinators only need element matchers to
//! implement [`Matcher`]. This module provides the few leaves they are built
//! and tested with: equality, the trivial matchers, a type check and a
//! feature (derived value) matcher.

use std::fmt;
use std::marker::PhantomData;

use derive_where::derive_where;
use thiserror::Error;

use crate::matcher::{DiagnosingMatcher, InvalidMatcher, Of, TypeSafe, TypeSafeDiagnosing};
use crate::{not, Description, Matcher, Not, SelfDescribing, TypeSafeMatcher, Value};

/// Matches values equal to an expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsEqual<T> {
    expected: T,
}

/// Match values equal to `expected`.
///
/// The value under test is compared as is first, then through its
/// [`Value::present`] view, so `equal_to(1)` accepts `Some(1)`. Two null
/// values are equal whatever their type: `equal_to(Null)` accepts `None`.
/// Values of another type never match.
pub fn equal_to<T: Value + PartialEq + Send + Sync>(expected: T) -> IsEqual<T> {
    IsEqual { expected }
}

impl<T: Value> SelfDescribing for IsEqual<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.expected);
    }
}

impl<T: Value + PartialEq + Send + Sync> Matcher for IsEqual<T> {
    fn matches(&self, actual: &dyn Value) -> bool {
        if let Some(actual) = actual.as_any().downcast_ref::<T>() {
            return actual == &self.expected;
        }
        match (self.expected.present(), actual.present()) {
            (None, None) => true,
            (_, Some(present)) => present
                .as_any()
                .downcast_ref::<T>()
                .is_some_and(|actual| actual == &self.expected),
            (Some(_), None) => false,
        }
    }
}

/// Matches everything, null included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anything;

/// Match any value.
pub fn anything() -> Anything {
    Anything
}

impl SelfDescribing for Anything {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("ANYTHING");
    }
}

impl Matcher for Anything {
    fn matches(&self, _actual: &dyn Value) -> bool {
        true
    }
}

/// Matches null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsNull;

/// Match null values.
pub fn null_value() -> IsNull {
    IsNull
}

/// Match values that are not null.
pub fn not_null() -> Not<IsNull> {
    not(IsNull)
}

impl SelfDescribing for IsNull {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("null");
    }
}

impl Matcher for IsNull {
    fn matches(&self, actual: &dyn Value) -> bool {
        actual.present().is_none()
    }
}

/// Matches values of runtime type `T`.
#[derive_where(Clone, Copy, Debug, Default)]
pub struct InstanceOf<T>(PhantomData<fn() -> T>);

/// Match values whose runtime type is `T`.
pub fn instance_of<T: Value>() -> TypeSafe<InstanceOf<T>> {
    TypeSafe(InstanceOf(PhantomData))
}

impl<T: Value> SelfDescribing for InstanceOf<T> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("an instance of ")
            .append_text(std::any::type_name::<T>());
    }
}

impl<T: Value> TypeSafeMatcher for InstanceOf<T> {
    type Tag = Of<T>;

    fn matches_safely(&self, _item: &T) -> bool {
        true
    }
}

/// Why a feature could not be read from a value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeatureError {
    /// The feature does not exist for this value
    #[error("{0}")]
    Unavailable(String),
    /// The accessor itself is broken or misconfigured
    #[error("internal accessor failure: {0}")]
    Internal(String),
}

/// Matches a feature derived from values of type `T`.
///
/// See [`has_feature`].
pub struct Feature<T, U, F> {
    name: String,
    description: String,
    accessor: F,
    matcher: Box<dyn Matcher>,
    _types: PhantomData<fn(&T) -> U>,
}

impl<T, U, F> fmt::Debug for Feature<T, U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("name", &self.name)
            .field("matcher", &Description::of(&self.matcher))
            .finish_non_exhaustive()
    }
}

/// Match values of type `T` whose feature, read by `accessor`, satisfies
/// `matcher`.
///
/// `name` identifies the feature in mismatch descriptions, `description`
/// introduces it in the matcher's own description. A
/// [`FeatureError::Unavailable`] from the accessor is reported as a mismatch.
///
/// Returns an error if `name` is empty.
///
/// # Panics
///
/// Matching panics if the accessor returns [`FeatureError::Internal`]: a
/// broken accessor is a fault in the test, not a property of the value.
pub fn has_feature<T, U, F>(
    name: impl Into<String>,
    description: impl Into<String>,
    accessor: F,
    matcher: impl Matcher + 'static,
) -> Result<TypeSafeDiagnosing<Feature<T, U, F>>, InvalidMatcher>
where
    T: Value,
    U: Value,
    F: Fn(&T) -> Result<U, FeatureError> + Send + Sync,
{
    let name = name.into();
    if name.is_empty() {
        return Err(InvalidMatcher::EmptyFeatureName);
    }
    Ok(TypeSafeDiagnosing(Feature {
        name,
        description: description.into(),
        accessor,
        matcher: Box::new(matcher),
        _types: PhantomData,
    }))
}

impl<T, U, F> SelfDescribing for Feature<T, U, F> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(&self.description)
            .append_text(" ")
            .append_description_of(&self.matcher);
    }
}

impl<T, U, F> DiagnosingMatcher for Feature<T, U, F>
where
    T: Value,
    U: Value,
    F: Fn(&T) -> Result<U, FeatureError> + Send + Sync,
{
    type Tag = Of<T>;

    fn matches_diagnosing(&self, item: &T, mismatch: &mut Description) -> bool {
        let feature = match (self.accessor)(item) {
            Ok(feature) => feature,
            Err(FeatureError::Unavailable(reason)) => {
                mismatch
                    .append_text(&self.name)
                    .append_text(" could not be read: ")
                    .append_text(&reason);
                return false;
            }
            Err(error @ FeatureError::Internal(_)) => {
                panic!("{name} accessor failed: {error}", name = self.name)
            }
        };
        if self.matcher.matches(&feature) {
            return true;
        }
        mismatch.append_text(&self.name).append_text(" ");
        self.matcher.describe_mismatch(&feature, mismatch);
        false
    }
}
