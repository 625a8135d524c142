//! Matchers over individual items and the size of a sequence.

use crate::matcher::{DiagnosingMatcher, Items, TypeSafeMatcher};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// Matches sequences with at least one item satisfying a matcher.
#[derive(Debug)]
pub struct HasItem {
    matcher: BoxedMatcher,
}

impl HasItem {
    pub(super) fn new(matcher: BoxedMatcher) -> Self {
        Self { matcher }
    }
}

impl SelfDescribing for HasItem {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a collection containing ")
            .append_description_of(&self.matcher);
    }
}

impl DiagnosingMatcher for HasItem {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        if items.iter().any(|item| self.matcher.matches(*item)) {
            return true;
        }
        if items.is_empty() {
            mismatch.append_text("was empty");
            return false;
        }
        mismatch.append_text("mismatches were: [");
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                mismatch.append_text(", ");
            }
            self.matcher.describe_mismatch(item, mismatch);
        }
        mismatch.append_text("]");
        false
    }
}

/// Matches sequences whose items all satisfy a matcher.
#[derive(Debug)]
pub struct EveryItem {
    matcher: BoxedMatcher,
}

impl EveryItem {
    pub(super) fn new(matcher: BoxedMatcher) -> Self {
        Self { matcher }
    }
}

impl SelfDescribing for EveryItem {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("every item is ")
            .append_description_of(&self.matcher);
    }
}

impl DiagnosingMatcher for EveryItem {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let Some(failing) = items.into_iter().find(|item| !self.matcher.matches(*item)) else {
            return true;
        };
        mismatch.append_text("an item ");
        self.matcher.describe_mismatch(failing, mismatch);
        false
    }
}

/// Matches sequences whose length satisfies a matcher over `usize`.
#[derive(Debug)]
pub struct IterableWithSize {
    size: BoxedMatcher,
}

impl IterableWithSize {
    pub(super) fn new(size: BoxedMatcher) -> Self {
        Self { size }
    }
}

impl SelfDescribing for IterableWithSize {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("an iterable with size ")
            .append_description_of(&self.size);
    }
}

impl DiagnosingMatcher for IterableWithSize {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let size = items.len();
        if self.size.matches(&size) {
            return true;
        }
        mismatch.append_text("iterable size ");
        self.size.describe_mismatch(&size, mismatch);
        false
    }
}

/// Matches sequences without items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyIterable;

impl SelfDescribing for EmptyIterable {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("an empty iterable");
    }
}

impl TypeSafeMatcher for EmptyIterable {
    type Tag = Items;

    fn matches_safely(&self, items: Vec<&dyn Value>) -> bool {
        items.is_empty()
    }

    fn describe_mismatch_safely(
        &self,
        items: Vec<&dyn Value>,
        _actual: &dyn Value,
        mismatch: &mut Description,
    ) {
        mismatch.append_value_list("[", ", ", "]", items);
    }
}
