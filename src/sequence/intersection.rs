use itertools::Itertools;

use crate::matcher::{DiagnosingMatcher, InvalidMatcher, Items};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// Matches sequences in which some item satisfies some matcher.
#[derive(Debug)]
pub struct Intersects {
    matchers: Vec<BoxedMatcher>,
}

impl Intersects {
    /// Returns an error if `matchers` is empty.
    pub(super) fn try_new(matchers: Vec<BoxedMatcher>) -> Result<Self, InvalidMatcher> {
        if matchers.is_empty() {
            return Err(InvalidMatcher::NoElementMatchers {
                matcher: "contains_any_of",
            });
        }
        Ok(Self { matchers })
    }
}

impl SelfDescribing for Intersects {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable containing any of ")
            .append_list("[", ", ", "]", &self.matchers);
    }
}

impl DiagnosingMatcher for Intersects {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let hit = items
            .iter()
            .cartesian_product(&self.matchers)
            .any(|(item, matcher)| matcher.matches(*item));
        if hit {
            return true;
        }
        mismatch
            .append_value_list("no item in [", ", ", "]", items)
            .append_list(" matched any of [", ", ", "]", &self.matchers);
        false
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{contains_any_of, contains_any_of_matchers, equal_to, Description, Matcher, Value};

    #[rstest]
    #[case(&vec![4, 5, 2], true)]
    #[case(&vec![1], true)]
    #[case(&vec![4, 5], false)]
    #[case(&Vec::<i32>::new(), false)]
    fn intersection(#[case] actual: &dyn Value, #[case] expected: bool) {
        let matcher = contains_any_of([1, 2, 3]).unwrap();
        assert_eq!(matcher.matches(actual), expected);
    }

    #[test]
    fn mismatch_lists_items_and_matchers() {
        let matcher = contains_any_of([1, 2]).unwrap();
        assert_eq!(
            Description::mismatch_of(&matcher, &vec![4, 5]),
            "no item in [<4>, <5>] matched any of [<1>, <2>]"
        );
        assert_eq!(
            Description::mismatch_of(&matcher, &Vec::<i32>::new()),
            "no item in [] matched any of [<1>, <2>]"
        );
        assert_eq!(
            Description::of(&matcher),
            "iterable containing any of [<1>, <2>]"
        );
    }

    #[test]
    fn empty_matcher_list_is_rejected() {
        let err = contains_any_of_matchers(Vec::<crate::IsEqual<i32>>::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "contains_any_of needs at least one element matcher"
        );
        assert!(contains_any_of_matchers([equal_to('a')]).is_ok());
    }
}
