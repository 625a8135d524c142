use smallvec::{smallvec, SmallVec};
use tracing::trace;

use super::relative_order::Lane;
use crate::matcher::{DiagnosingMatcher, InvalidMatcher, Items};
use crate::{BoxedMatcher, Description, SelfDescribing, Value};

/// Matches sequences made of interleaved runs, each satisfying the same list
/// of matchers in relative order.
///
/// Every item advances at most one run: the earliest-started run whose next
/// matcher accepts it. Runs start in order, so the earliest-started run is
/// also the one with the lowest index.
#[derive(Debug)]
pub struct ParallelRuns {
    runs: usize,
    matchers: Vec<BoxedMatcher>,
}

impl ParallelRuns {
    /// Expect `runs` runs of `matchers`.
    ///
    /// Returns an error if `runs` is zero.
    pub(super) fn try_new(runs: usize, matchers: Vec<BoxedMatcher>) -> Result<Self, InvalidMatcher> {
        if runs == 0 {
            return Err(InvalidMatcher::NoRuns);
        }
        Ok(Self { runs, matchers })
    }
}

impl SelfDescribing for ParallelRuns {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(&format!("iterable containing {} parallel runs of ", self.runs))
            .append_list("[", ", ", "]", &self.matchers);
    }
}

impl DiagnosingMatcher for ParallelRuns {
    type Tag = Items;

    fn matches_diagnosing(&self, items: Vec<&dyn Value>, mismatch: &mut Description) -> bool {
        let mut lanes: SmallVec<[Lane<'_>; 4]> = smallvec![Lane::default(); self.runs];
        for item in items {
            let advanced = lanes
                .iter_mut()
                .position(|lane| lane.try_advance(&self.matchers, item));
            if let Some(run) = advanced {
                if lanes[run].is_complete(&self.matchers) {
                    trace!(run, "parallel run complete");
                }
            }
        }

        let mut stuck = lanes
            .iter()
            .enumerate()
            .filter(|(_, lane)| !lane.is_complete(&self.matchers))
            .peekable();
        if stuck.peek().is_none() {
            return true;
        }
        for (i, (run, lane)) in stuck.enumerate() {
            if i > 0 {
                mismatch.append_text("; and ");
            }
            lane.describe_stuck(&self.matchers, mismatch);
            mismatch.append_text(&format!(" in run {}", run + 1));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{contains_parallel_runs_of, Description, Matcher, Value};

    #[rstest]
    #[case(&vec![1, 1, 2, 3, 2], true)]
    #[case(&vec![1, 2, 1, 2], true)]
    #[case(&vec![1, 1, 2, 2], true)]
    #[case(&vec![1, 2], false)]
    #[case(&vec![1, 1, 2], false)]
    #[case(&vec![2, 2, 1, 1], false)]
    fn two_runs(#[case] actual: &dyn Value, #[case] expected: bool) {
        let matcher = contains_parallel_runs_of(2, [1, 2]).unwrap();
        assert_eq!(matcher.matches(actual), expected);
    }

    #[rstest]
    #[case(&vec![1, 2], "<1> was not found in run 2")]
    #[case(&vec![1, 1, 2], "<2> was not found after <1> in run 2")]
    #[case(
        &vec![2, 2, 1, 1],
        "<2> was not found after <1> in run 1; and <2> was not found after <1> in run 2"
    )]
    #[case(
        &Vec::<i32>::new(),
        "<1> was not found in run 1; and <1> was not found in run 2"
    )]
    fn two_runs_mismatches(#[case] actual: &dyn Value, #[case] expected: &str) {
        let matcher = contains_parallel_runs_of(2, [1, 2]).unwrap();
        assert_eq!(Description::mismatch_of(&matcher, actual), expected);
    }

    #[test]
    fn single_run_is_relative_order() {
        let matcher = contains_parallel_runs_of(1, [2, 4]).unwrap();
        assert!(matcher.matches(&vec![1, 2, 3, 4]));
        assert_eq!(
            Description::mismatch_of(&matcher, &vec![4, 2]),
            "<4> was not found after <2> in run 1"
        );
    }

    #[test]
    fn item_advances_one_run_only() {
        // A single 1 must not start both runs.
        let matcher = contains_parallel_runs_of(2, [1]).unwrap();
        assert!(!matcher.matches(&vec![1]));
        assert!(matcher.matches(&vec![1, 5, 1]));
    }

    #[test]
    fn many_runs_spill_onto_the_heap() {
        let matcher = contains_parallel_runs_of(6, ["x"]).unwrap();
        assert!(matcher.matches(&vec!["x"; 6]));
        assert_eq!(
            Description::mismatch_of(&matcher, &vec!["x"; 5]),
            "\"x\" was not found in run 6"
        );
    }

    #[test]
    fn describes_run_count() {
        let matcher = contains_parallel_runs_of(2, [1, 2]).unwrap();
        assert_eq!(
            Description::of(&matcher),
            "iterable containing 2 parallel runs of [<1>, <2>]"
        );
    }
}
