use crate::matcher::{DiagnosingMatcher, Items};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// A forward cursor into a matcher list.
///
/// A lane advances when the matcher under its cursor accepts an item, and
/// remembers that item to explain where it got stuck.
#[derive(Clone, Copy, Default)]
pub(super) struct Lane<'a> {
    cursor: usize,
    last_matched: Option<&'a dyn Value>,
}

impl<'a> Lane<'a> {
    /// Advance past the current matcher if it accepts `item`.
    pub(super) fn try_advance(&mut self, matchers: &[BoxedMatcher], item: &'a dyn Value) -> bool {
        let Some(matcher) = matchers.get(self.cursor) else {
            return false;
        };
        if !matcher.matches(item) {
            return false;
        }
        self.cursor += 1;
        self.last_matched = Some(item);
        true
    }

    pub(super) fn is_complete(&self, matchers: &[BoxedMatcher]) -> bool {
        self.cursor >= matchers.len()
    }

    /// `<m> was not found[ after <last matched item>]`, the suffix only when
    /// that item is not null.
    pub(super) fn describe_stuck(&self, matchers: &[BoxedMatcher], mismatch: &mut Description) {
        let Some(matcher) = matchers.get(self.cursor) else {
            return;
        };
        mismatch
            .append_description_of(matcher)
            .append_text(" was not found");
        if let Some(last) = self.last_matched.filter(|last| last.present().is_some()) {
            mismatch.append_text(" after ").append_value(last);
        }
    }
}

/// Matches sequences containing a subsequence that satisfies a list of
/// matchers in order.
#[derive(Debug)]
pub struct InRelativeOrder {
    matchers: Vec<BoxedMatcher>,
}

impl InRelativeOrder {
    pub(super) fn new(matchers: Vec<BoxedMatcher>) -> Self {
        Self { matchers }
    }
}

impl SelfDescribing for InRelativeOrder {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable containing ")
            .append_list("[", ", ", "]", &self.matchers)
            .append_text(" in relative order");
    }
}

impl DiagnosingMatcher for InRelativeOrder {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let mut lane = Lane::default();
        for item in items {
            lane.try_advance(&self.matchers, item);
            if lane.is_complete(&self.matchers) {
                return true;
            }
        }
        if lane.is_complete(&self.matchers) {
            return true;
        }
        lane.describe_stuck(&self.matchers, mismatch);
        false
    }
}
