use itertools::{EitherOrBoth, Itertools};

use crate::matcher::{DiagnosingMatcher, Items};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// Matches sequences item by item against a list of matchers, in order.
///
/// See [`crate::contains`].
#[derive(Debug)]
pub struct InOrder {
    matchers: Vec<BoxedMatcher>,
}

impl InOrder {
    pub(super) fn new(matchers: Vec<BoxedMatcher>) -> Self {
        Self { matchers }
    }
}

impl SelfDescribing for InOrder {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable containing ")
            .append_list("[", ", ", "]", &self.matchers);
    }
}

impl DiagnosingMatcher for InOrder {
    type Tag = Items;

    /// Scan matchers and items in lockstep, stopping at the first failure.
    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        for (i, pair) in self.matchers.iter().zip_longest(items).enumerate() {
            match pair {
                EitherOrBoth::Both(matcher, item) => {
                    if !matcher.matches(item) {
                        mismatch.append_text(&format!("item {i}: "));
                        matcher.describe_mismatch(item, mismatch);
                        return false;
                    }
                }
                EitherOrBoth::Left(missing) => {
                    mismatch
                        .append_text("no item was ")
                        .append_description_of(missing);
                    return false;
                }
                EitherOrBoth::Right(extra) => {
                    mismatch.append_text("not matched: ").append_value(extra);
                    return false;
                }
            }
        }
        true
    }
}
