//! The public assertion surface, as a downstream test suite uses it.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};

use rstest::rstest;
use seqmatch::{
    assert_that, check_that, contains, contains_in_any_order, contains_in_relative_order,
    contains_parallel_runs_of, display_value, equal_to, every_item, has_feature, has_items, is,
    not, Asserter, AssertionError, Description, FeatureError, Matcher, MatcherExt, Null,
    SoftAssertions, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("seqmatch=trace")
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
struct Event {
    kind: &'static str,
    at: u32,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.kind, self.at)
    }
}

display_value!(Event);

fn kind(event: &Event) -> Result<&'static str, FeatureError> {
    Ok(event.kind)
}

fn event(kind: &'static str, at: u32) -> Event {
    Event { kind, at }
}

#[test]
fn user_types_take_part_in_sequences() {
    init_tracing();
    let log = vec![
        event("open", 1),
        event("read", 2),
        event("open", 3),
        event("read", 4),
        event("close", 5),
        event("close", 6),
    ];
    let of_kind = |k: &'static str| has_feature("kind", "an event of kind", kind, equal_to(k)).unwrap();

    assert_that!(
        log,
        contains_parallel_runs_of_kinds(2, &["open", "read", "close"], &of_kind)
    );
    assert_that!(log, every_item(not(equal_to(event("crash", 0)))));
    assert_that!(log, contains_in_relative_order([event("open", 1), event("close", 6)]));

    let matcher = contains_parallel_runs_of_kinds(3, &["open", "close"], &of_kind);
    assert!(!matcher.matches(&log));
    assert_eq!(
        Description::mismatch_of(&matcher, &log),
        "an event of kind \"open\" was not found in run 3"
    );
}

fn contains_parallel_runs_of_kinds<M: Matcher + 'static>(
    runs: usize,
    kinds: &[&'static str],
    of_kind: &impl Fn(&'static str) -> M,
) -> impl Matcher {
    seqmatch::contains_parallel_runs_of_matchers(runs, kinds.iter().map(|&k| of_kind(k))).unwrap()
}

#[rstest]
#[case(&vec![1, 2, 3])]
#[case(&VecDeque::from([3, 1, 2]))]
#[case(&BTreeSet::from([2, 3, 1]))]
#[case(&[2, 1, 3])]
fn collections_are_interchangeable(#[case] actual: &dyn Value) {
    assert_that(actual, &contains_in_any_order([1, 2, 3]));
    assert_that(actual, &has_items([equal_to(1), equal_to(3)]));
}

#[test]
fn readings_with_gaps() {
    let readings = vec![Some(1), None, Some(3)];
    assert_that!(readings, contains([Some(1), None, Some(3)]));
    assert_that!(readings, contains_in_any_order([None, Some(3), Some(1)]));
    assert_that(&Null, &equal_to(Null));
    assert_that(&None::<u8>, &equal_to(Null));

    let error = check_that("", &readings, &contains([Some(1), Some(2), Some(3)])).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Expected: iterable containing [<1>, <2>, <3>]\n     but: item 1: was null"
    );
}

#[test]
fn failure_message_is_exact() {
    let payload = catch_unwind(|| {
        assert_that!(vec![1, 1, 2], contains_parallel_runs_of(2, [1, 2]).unwrap(), "two sessions")
    })
    .unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some(
            "two sessions\n\
             Expected: iterable containing 2 parallel runs of [<1>, <2>]\n     \
             but: <2> was not found after <1> in run 2"
        )
    );
}

#[test]
fn custom_strategy_collects_failures() {
    init_tracing();
    let failures = RefCell::new(Vec::new());
    {
        let record = |error: AssertionError| failures.borrow_mut().push(error.to_string());
        let asserter = Asserter::with_strategy(record);
        asserter.assert_that(&vec!["a", "b"], &is(contains(["a", "b"])));
        asserter.assert_that(&vec!["b", "a"], &is(contains(["a", "b"])));
        asserter.assert_that(&5, &equal_to(5).and(not(equal_to(6))));
    }
    assert_eq!(
        failures.into_inner(),
        vec!["Expected: is iterable containing [\"a\", \"b\"]\n     but: item 0: was \"b\""]
    );
}

#[test]
fn soft_assertions_report_everything() {
    init_tracing();
    let first = vec![1, 2];
    let second = vec![2, 1];
    let mut batch = SoftAssertions::new();
    batch.check_that(&first, contains([1, 2]));
    batch.check_that_with_reason("sorted", &second, contains([1, 2]));
    batch.check_that(&second, contains_in_relative_order([1, 2]));

    let error = batch.resolve().unwrap_err();
    assert_eq!(
        error.to_string(),
        "1) sorted: expected iterable containing [<1>, <2>], but item 0: was <2>\n\
         2) expected iterable containing [<1>, <2>] in relative order, but <2> was not found after <1>"
    );
    assert!(catch_unwind(AssertUnwindSafe(|| batch.verify())).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn assertion_errors_serialize() {
    let error = seqmatch::check_that("", &1, &equal_to(2)).unwrap_err();
    let json = serde_json::to_string(&error).unwrap();
    let back: AssertionError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, error);
}
