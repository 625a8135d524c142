//! Boolean composition of matchers.
//!
//! [`AllOf`] and [`AnyOf`] short-circuit: they stop evaluating their
//! matchers as soon as the result is known. Both describe themselves as a
//! parenthesised list, so nested combinations stay readable at any depth,
//! e.g. `(<1> or (<2> and not <3>))`.
//!
//! The decorators of [`decorate`] change how a matcher reads without
//! changing what it matches (except [`Not`], which negates it).

mod decorate;

use crate::matcher::boxed_all;
use crate::{BoxedMatcher, Description, Matcher, SelfDescribing, Value};

pub use self::decorate::{are, described_as, is, not, Are, DescribedAs, Is, Not};

/// Matches values that satisfy every matcher.
#[derive(Debug)]
pub struct AllOf {
    matchers: Vec<BoxedMatcher>,
}

/// Match values satisfying all of `matchers`.
///
/// Matchers are evaluated in order; evaluation stops at the first failure.
/// An empty list matches everything.
pub fn all_of<M: Matcher + 'static>(matchers: impl IntoIterator<Item = M>) -> AllOf {
    AllOf {
        matchers: boxed_all(matchers),
    }
}

impl AllOf {
    /// Evaluate the matchers in order, describing the first failure unless
    /// `mismatch` discards.
    fn matches_with(&self, actual: &dyn Value, mismatch: &mut Description) -> bool {
        let Some(failing) = self.matchers.iter().find(|m| !m.matches(actual)) else {
            return true;
        };
        if mismatch.is_discarding() {
            return false;
        }
        mismatch.append_description_of(failing).append_text(" ");
        failing.describe_mismatch(actual, mismatch);
        false
    }
}

impl SelfDescribing for AllOf {
    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " and ", ")", &self.matchers);
    }
}

impl Matcher for AllOf {
    fn matches(&self, actual: &dyn Value) -> bool {
        self.matches_with(actual, &mut Description::none())
    }

    fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
        self.matches_with(actual, mismatch);
    }
}

/// Matches values that satisfy at least one matcher.
#[derive(Debug)]
pub struct AnyOf {
    matchers: Vec<BoxedMatcher>,
}

/// Match values satisfying any of `matchers`.
///
/// Matchers are evaluated in order; evaluation stops at the first success.
/// An empty list matches nothing.
pub fn any_of<M: Matcher + 'static>(matchers: impl IntoIterator<Item = M>) -> AnyOf {
    AnyOf {
        matchers: boxed_all(matchers),
    }
}

impl SelfDescribing for AnyOf {
    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " or ", ")", &self.matchers);
    }
}

impl Matcher for AnyOf {
    fn matches(&self, actual: &dyn Value) -> bool {
        self.matchers.iter().any(|m| m.matches(actual))
    }

    /// Each matcher's description followed by its mismatch, joined by `and`.
    fn describe_mismatch(&self, actual: &dyn Value, mismatch: &mut Description) {
        for (i, matcher) in self.matchers.iter().enumerate() {
            if i > 0 {
                mismatch.append_text(" and ");
            }
            mismatch.append_description_of(matcher).append_text(" ");
            matcher.describe_mismatch(actual, mismatch);
        }
    }
}
