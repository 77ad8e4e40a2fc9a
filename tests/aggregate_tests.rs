use playwright_report::aggregate::ranking::{
    SLOWEST_LIMIT, SuiteCounts, resolve_tracked_suites, slowest_tests, suite_results, suite_times,
};
use playwright_report::{ReconcileMode, reconcile};

use crate::common::builders::{fail, in_suite, pass};

mod common;

// ============================================================================
// 1. Per-suite time
// ============================================================================

#[test]
fn suite_times_sum_canonical_time_slowest_first() {
    let tests = reconcile(
        &[
            in_suite(pass("a", 1.0), "fast.spec.js"),
            in_suite(pass("b", 2.0), "slow.spec.js"),
            in_suite(pass("c", 4.0), "slow.spec.js"),
            in_suite(pass("d", 3.0), "fast.spec.js"),
        ],
        ReconcileMode::Retry,
    );
    let times = suite_times(&tests);
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].suite, "slow.spec.js");
    assert_eq!(times[0].seconds, 6.0);
    assert_eq!(times[1].suite, "fast.spec.js");
    assert_eq!(times[1].seconds, 4.0);
}

#[test]
fn suite_times_use_last_attempt_not_all_attempts() {
    let tests = reconcile(&[fail("a", 10.0), pass("a", 1.0)], ReconcileMode::Retry);
    let times = suite_times(&tests);
    assert_eq!(times[0].seconds, 1.0);
}

// ============================================================================
// 2. Slowest tests
// ============================================================================

#[test]
fn slowest_tests_keeps_top_ten_ascending() {
    let attempts: Vec<_> = (0..15)
        .map(|i| pass(&format!("t{:02}", i), i as f64))
        .collect();
    let tests = reconcile(&attempts, ReconcileMode::Retry);

    let slowest = slowest_tests(&tests);
    assert_eq!(slowest.len(), SLOWEST_LIMIT);
    assert_eq!(slowest.first().unwrap().name, "t05");
    assert_eq!(slowest.last().unwrap().name, "t14");
    assert!(slowest.windows(2).all(|w| w[0].elapsed_seconds <= w[1].elapsed_seconds));
}

#[test]
fn slowest_tests_with_fewer_than_limit() {
    let tests = reconcile(&[pass("a", 2.0), pass("b", 1.0)], ReconcileMode::Retry);
    let names: Vec<&str> = slowest_tests(&tests).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn slowest_tests_of_nothing() {
    assert!(slowest_tests(&[]).is_empty());
}

// ============================================================================
// 3. Per-suite pass/fail
// ============================================================================

#[test]
fn tracked_suites_default_to_all_seen() {
    let tests = reconcile(
        &[
            in_suite(pass("a", 1.0), "one.spec.js"),
            in_suite(pass("b", 1.0), "two.spec.js"),
            in_suite(pass("c", 1.0), "one.spec.js"),
        ],
        ReconcileMode::Retry,
    );
    assert_eq!(
        resolve_tracked_suites(&tests, &[]),
        vec!["one.spec.js".to_string(), "two.spec.js".to_string()]
    );
}

#[test]
fn tracked_suites_respect_request() {
    let tests = reconcile(&[in_suite(pass("a", 1.0), "one.spec.js")], ReconcileMode::Retry);
    let requested = vec!["two.spec.js".to_string()];
    assert_eq!(resolve_tracked_suites(&tests, &requested), requested);
}

#[test]
fn tracked_suites_drop_repeats() {
    let tests = reconcile(&[in_suite(fail("a", 1.0), "one.spec.js")], ReconcileMode::Retry);
    let requested = vec![
        "one.spec.js".to_string(),
        "two.spec.js".to_string(),
        "one.spec.js".to_string(),
    ];
    let tracked = resolve_tracked_suites(&tests, &requested);
    assert_eq!(tracked, vec!["one.spec.js".to_string(), "two.spec.js".to_string()]);
    assert_eq!(suite_results(&tests, &tracked).len(), tracked.len());
}

#[test]
fn suite_results_count_reconciled_outcomes() {
    let tests = reconcile(
        &[
            in_suite(fail("a", 1.0), "one.spec.js"),
            in_suite(pass("a", 1.0), "one.spec.js"),
            in_suite(fail("b", 1.0), "one.spec.js"),
            in_suite(pass("c", 1.0), "two.spec.js"),
        ],
        ReconcileMode::Retry,
    );
    let tracked = vec!["one.spec.js".to_string(), "missing.spec.js".to_string()];
    let counts = suite_results(&tests, &tracked);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["one.spec.js"], SuiteCounts { passed: 1, failed: 1 });
    assert_eq!(counts["missing.spec.js"], SuiteCounts::default());
    assert!(!counts.contains_key("two.spec.js"));
}
