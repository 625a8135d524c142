use bitvec::prelude::*;
use tracing::trace;

use crate::matcher::{DiagnosingMatcher, Items};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// Matches sequences whose items satisfy a list of matchers one to one, in
/// any order.
///
/// Each item consumes the first unused matcher that accepts it. The
/// assignment is greedy and never revisited: with matchers `[1 or 2, 1]`,
/// the sequence `[1, 2]` is rejected although `2 -> "1 or 2"`, `1 -> 1`
/// would be a valid assignment.
#[derive(Debug)]
pub struct InAnyOrder {
    matchers: Vec<BoxedMatcher>,
}

impl InAnyOrder {
    pub(super) fn new(matchers: Vec<BoxedMatcher>) -> Self {
        Self { matchers }
    }
}

impl SelfDescribing for InAnyOrder {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable with items ")
            .append_list("[", ", ", "]", &self.matchers)
            .append_text(" in any order");
    }
}

impl DiagnosingMatcher for InAnyOrder {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let mut used = bitvec![0; self.matchers.len()];
        let mut unmatched = Vec::new();
        for item in &items {
            let claimed = used
                .iter_zeros()
                .find(|&i| self.matchers[i].matches(*item));
            match claimed {
                Some(i) => {
                    trace!(matcher = i, "item consumed matcher");
                    used.set(i, true);
                }
                None => unmatched.push(*item),
            }
        }
        if unmatched.is_empty() && used.all() {
            return true;
        }

        let has_unmatched = !unmatched.is_empty();
        if has_unmatched {
            mismatch.append_value_list("not matched: ", ", ", "", unmatched);
        }
        if used.not_all() {
            if has_unmatched {
                mismatch.append_text(" and ");
            }
            mismatch
                .append_list(
                    "no item matches: ",
                    ", ",
                    "",
                    used.iter_zeros().map(|i| &self.matchers[i]),
                )
                .append_value_list(" in [", ", ", "]", items);
        }
        false
    }
}
