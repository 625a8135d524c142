//! Collect-all-failures assertions.

use derive_more::{Display, From, Into};
use itertools::Itertools;
use tracing::debug;

use super::{AssertionError, FailStrategy, PanicStrategy};
use crate::{Description, Matcher, Value};

/// Identifies a check registered with [`SoftAssertions`], by registration
/// order starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Display)]
pub struct CheckId(usize);

/// A registered, not yet evaluated check.
struct Check<'a> {
    reason: String,
    actual: &'a dyn Value,
    matcher: Box<dyn Matcher + 'a>,
}

impl Check<'_> {
    fn passes(&self) -> bool {
        self.matcher.matches(self.actual)
    }

    /// `[<reason>: ]expected <description>, but <mismatch>`
    fn describe_failure(&self, description: &mut Description) {
        if !self.reason.is_empty() {
            description.append_text(&self.reason).append_text(": ");
        }
        description
            .append_text("expected ")
            .append_description_of(&self.matcher)
            .append_text(", but ");
        self.matcher.describe_mismatch(self.actual, description);
    }
}

/// A batch of checks, reported together.
///
/// Checks are only registered by [`Self::check_that`]; nothing is evaluated
/// until [`Self::resolve`] or [`Self::verify`]. The failure of a batch lists
/// every failing check on its own line, numbered from `1)` in registration
/// order.
///
/// ```
/// use seqmatch::{contains, equal_to, SoftAssertions};
///
/// let items = vec![1, 2];
/// let mut batch = SoftAssertions::new();
/// batch.check_that(&items, contains([1, 2]));
/// batch.check_that_with_reason("answer", &41, equal_to(42));
/// let error = batch.resolve().unwrap_err();
/// assert_eq!(error.to_string(), "1) answer: expected <42>, but was <41>");
/// ```
pub struct SoftAssertions<'a, S = PanicStrategy> {
    checks: Vec<Check<'a>>,
    strategy: S,
}

impl<'a> SoftAssertions<'a> {
    /// An empty batch that panics when verified with failures.
    pub fn new() -> Self {
        Self::with_strategy(PanicStrategy)
    }
}

impl Default for SoftAssertions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: FailStrategy> SoftAssertions<'a, S> {
    /// An empty batch handing its failure to `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            checks: Vec::new(),
            strategy,
        }
    }

    /// Register a check of `actual` against `matcher`.
    pub fn check_that(&mut self, actual: &'a dyn Value, matcher: impl Matcher + 'a) -> CheckId {
        self.check_that_with_reason("", actual, matcher)
    }

    /// Register a check of `actual` against `matcher`, explained by `reason`
    /// on failure.
    pub fn check_that_with_reason(
        &mut self,
        reason: impl Into<String>,
        actual: &'a dyn Value,
        matcher: impl Matcher + 'a,
    ) -> CheckId {
        self.checks.push(Check {
            reason: reason.into(),
            actual,
            matcher: Box::new(matcher),
        });
        CheckId(self.checks.len() - 1)
    }

    /// The number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no check is registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluate every check, returning the ids of those that fail.
    pub fn failed_checks(&self) -> Vec<CheckId> {
        self.checks
            .iter()
            .positions(|check| !check.passes())
            .map(CheckId::from)
            .collect()
    }

    /// Evaluate every check, returning one error listing all failures.
    pub fn resolve(&self) -> Result<(), AssertionError> {
        let failing = self.checks.iter().filter(|check| !check.passes()).collect_vec();
        if failing.is_empty() {
            return Ok(());
        }
        let message = failing
            .iter()
            .enumerate()
            .map(|(i, check)| {
                let mut line = Description::new();
                line.append_text(&format!("{}) ", i + 1));
                check.describe_failure(&mut line);
                line.into_string()
            })
            .join("\n");
        debug!(failures = failing.len(), checks = self.checks.len(), "soft assertions failed");
        Err(AssertionError::Aggregate {
            failures: failing.len(),
            message,
        })
    }

    /// Evaluate every check, handing any failure to the batch's strategy.
    #[track_caller]
    pub fn verify(&self) {
        if let Err(error) = self.resolve() {
            self.strategy.fail(error);
        }
    }
}
