//! Assertions: evaluate a matcher against a value and report failures.
//!
//! [`check_that`] is the pure core: it returns the formatted failure as an
//! [`AssertionError`]. The `assert_*` functions, the [`assert_that!`] macro
//! and [`Asserter`] hand that error to a [`FailStrategy`], which by default
//! panics. [`SoftAssertions`] collects several checks and reports all their
//! failures at once.
//!
//! A failure message reads
//! ```text
//! <reason>
//! Expected: <matcher description>
//!      but: <mismatch description>
//! ```
//! where the reason line is omitted when the reason is empty.
//!
//! [`assert_that!`]: crate::assert_that!

mod batch;

use thiserror::Error;
use tracing::debug;

use crate::{Description, Matcher, Value};

pub use self::batch::{CheckId, SoftAssertions};

/// A failed assertion, assumption or batch of checks.
///
/// The `Display` output is the complete failure message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum AssertionError {
    /// A value did not satisfy a matcher
    #[error("{message}")]
    Failed {
        /// The formatted failure message
        message: String,
    },

    /// Some checks of a [`SoftAssertions`] batch failed
    #[error("{message}")]
    Aggregate {
        /// The number of failing checks
        failures: usize,
        /// One numbered line per failing check
        message: String,
    },

    /// A value did not satisfy an assumed matcher
    #[error("{message}")]
    Assumption {
        /// The formatted failure message
        message: String,
    },
}

impl AssertionError {
    /// The formatted failure message.
    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message }
            | Self::Aggregate { message, .. }
            | Self::Assumption { message } => message,
        }
    }

    /// Whether the error reports an assumption rather than a failure.
    pub fn is_assumption(&self) -> bool {
        matches!(self, Self::Assumption { .. })
    }
}

/// Check `actual` against `matcher`, returning the failure message if it
/// does not match.
pub fn check_that(
    reason: &str,
    actual: &dyn Value,
    matcher: &(impl Matcher + ?Sized),
) -> Result<(), AssertionError> {
    match failure_message(reason, actual, matcher) {
        None => Ok(()),
        Some(message) => Err(AssertionError::Failed { message }),
    }
}

/// The failure message of `matcher` on `actual`, or `None` on a match.
fn failure_message(
    reason: &str,
    actual: &dyn Value,
    matcher: &(impl Matcher + ?Sized),
) -> Option<String> {
    if matcher.matches(actual) {
        return None;
    }
    let mut description = Description::new();
    if !reason.is_empty() {
        description.append_text(reason).append_text("\n");
    }
    description
        .append_text("Expected: ")
        .append_description_of(matcher)
        .append_text("\n     but: ");
    matcher.describe_mismatch(actual, &mut description);
    Some(description.into_string())
}

/// What to do with a failed assertion.
pub trait FailStrategy {
    /// Signal `error` to the caller.
    fn fail(&self, error: AssertionError);
}

impl<F: Fn(AssertionError)> FailStrategy for F {
    fn fail(&self, error: AssertionError) {
        self(error)
    }
}

/// Panic on failure.
///
/// Failures panic with the failure message, as `assert!` does. Assumptions
/// panic with the [`AssertionError::Assumption`] itself as payload, so a
/// harness catching the unwind can tell a skipped test from a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanicStrategy;

impl FailStrategy for PanicStrategy {
    #[track_caller]
    fn fail(&self, error: AssertionError) {
        if error.is_assumption() {
            std::panic::panic_any(error);
        }
        panic!("{error}");
    }
}

/// Runs assertions, signalling failures through a [`FailStrategy`].
#[derive(Debug, Clone, Default)]
pub struct Asserter<S = PanicStrategy> {
    strategy: S,
}

impl Asserter {
    /// An asserter that panics on failure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: FailStrategy> Asserter<S> {
    /// An asserter that signals failures through `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Assert that `actual` satisfies `matcher`.
    #[track_caller]
    pub fn assert_that(&self, actual: &dyn Value, matcher: &(impl Matcher + ?Sized)) {
        self.assert_that_with_reason("", actual, matcher)
    }

    /// Assert that `actual` satisfies `matcher`, explaining the assertion
    /// with `reason` on failure.
    #[track_caller]
    pub fn assert_that_with_reason(
        &self,
        reason: &str,
        actual: &dyn Value,
        matcher: &(impl Matcher + ?Sized),
    ) {
        if let Err(error) = check_that(reason, actual, matcher) {
            debug!(reason, "assertion failed");
            self.strategy.fail(error);
        }
    }

    /// Assert that `condition` holds; the failure message is `reason`.
    #[track_caller]
    pub fn assert_true(&self, reason: &str, condition: bool) {
        if !condition {
            debug!(reason, "assertion failed");
            self.strategy.fail(AssertionError::Failed {
                message: reason.to_owned(),
            });
        }
    }

    /// Assume that `actual` satisfies `matcher`.
    ///
    /// A failed assumption is reported as [`AssertionError::Assumption`].
    #[track_caller]
    pub fn assume_that(&self, actual: &dyn Value, matcher: &(impl Matcher + ?Sized)) {
        if let Some(message) = failure_message("", actual, matcher) {
            debug!("assumption failed");
            self.strategy.fail(AssertionError::Assumption { message });
        }
    }
}

/// Assert that `actual` satisfies `matcher`; panic otherwise.
#[track_caller]
pub fn assert_that(actual: &dyn Value, matcher: &(impl Matcher + ?Sized)) {
    Asserter::new().assert_that(actual, matcher)
}

/// Assert that `actual` satisfies `matcher`; panic with `reason` otherwise.
#[track_caller]
pub fn assert_that_with_reason(reason: &str, actual: &dyn Value, matcher: &(impl Matcher + ?Sized)) {
    Asserter::new().assert_that_with_reason(reason, actual, matcher)
}

/// Assert that `condition` holds; panic with `reason` otherwise.
#[track_caller]
pub fn assert_true(reason: &str, condition: bool) {
    Asserter::new().assert_true(reason, condition)
}

/// Assume that `actual` satisfies `matcher`.
///
/// On failure, panics with an [`AssertionError::Assumption`] payload.
#[track_caller]
pub fn assume_that(actual: &dyn Value, matcher: &(impl Matcher + ?Sized)) {
    Asserter::new().assume_that(actual, matcher)
}

/// Assert that a value satisfies a matcher.
///
/// An optional trailing format string and arguments give the reason.
///
/// ```
/// use seqmatch::{assert_that, contains};
///
/// assert_that!(vec![1, 2], contains([1, 2]));
/// assert_that!(vec![1, 2], contains([1, 2]), "checking {} items", 2);
/// ```
#[macro_export]
macro_rules! assert_that {
    ($actual:expr, $matcher:expr $(,)?) => {
        $crate::assert_that(&$actual, &$matcher)
    };
    ($actual:expr, $matcher:expr, $($reason:tt)+) => {
        $crate::assert_that_with_reason(&::std::format!($($reason)+), &$actual, &$matcher)
    };
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::catch_unwind;

    use insta::assert_snapshot;
    use rstest::rstest;

    use super::*;
    use crate::{contains, equal_to, Null};

    #[test]
    fn failure_message_layout() {
        let err = check_that("lengths differ", &vec![1, 2], &contains([1, 2, 3])).unwrap_err();
        assert_snapshot!(err.to_string(), @r###"
        lengths differ
        Expected: iterable containing [<1>, <2>, <3>]
             but: no item was <3>
        "###);
    }

    #[rstest]
    #[case("", "Expected: <1>\n     but: was <2>")]
    #[case("why", "why\nExpected: <1>\n     but: was <2>")]
    fn reason_line_is_optional(#[case] reason: &str, #[case] expected: &str) {
        let err = check_that(reason, &2, &equal_to(1)).unwrap_err();
        assert_eq!(err.message(), expected);
        assert_eq!(err, AssertionError::Failed { message: expected.into() });
    }

    #[test]
    fn matching_values_pass() {
        assert_eq!(check_that("", &vec![1], &contains([1])), Ok(()));
        assert_that(&vec![1], &contains([1]));
        assert_that!(vec![1], contains([1]), "reason {}", 1);
        assert_true("always", true);
        assume_that(&1, &equal_to(1));
    }

    #[test]
    fn failures_panic_with_message() {
        let payload = catch_unwind(|| assert_that(&Null, &contains([1]))).unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("Expected: iterable containing [<1>]\n     but: was null")
        );
    }

    #[test]
    fn assumptions_panic_with_typed_payload() {
        let payload = catch_unwind(|| assume_that(&2, &equal_to(1))).unwrap_err();
        let error = payload.downcast_ref::<AssertionError>().unwrap();
        assert!(error.is_assumption());
        assert_eq!(error.message(), "Expected: <1>\n     but: was <2>");
    }

    #[test]
    fn strategies_are_pluggable() {
        let failures = RefCell::new(Vec::new());
        {
            let record = |error: AssertionError| failures.borrow_mut().push(error);
            let asserter = Asserter::with_strategy(record);
            asserter.assert_that(&1, &equal_to(1));
            asserter.assert_that_with_reason("second", &vec![2], &contains([3]));
            asserter.assert_true("must hold", false);
            asserter.assume_that(&"a", &equal_to("b"));
        }

        let failures = failures.into_inner();
        assert_eq!(failures.len(), 3);
        assert_eq!(
            failures[0].message(),
            "second\nExpected: iterable containing [<3>]\n     but: item 0: was <2>"
        );
        assert_eq!(
            failures[1],
            AssertionError::Failed {
                message: "must hold".into()
            }
        );
        assert!(failures[2].is_assumption());
    }
}
