use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::reconcile::canonical::CanonicalTestResult;

/// How many tests the "slowest" view keeps.
pub const SLOWEST_LIMIT: usize = 10;

/// Summed canonical time for one suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteTime {
    pub suite: String,
    pub seconds: f64,
}

/// Reconciled pass/fail counts for one tracked suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteCounts {
    pub passed: usize,
    pub failed: usize,
}

/// Per-suite total time, slowest suite first.
///
/// Ties keep first-seen order.
pub fn suite_times(tests: &[CanonicalTestResult]) -> Vec<SuiteTime> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for test in tests {
        *totals.entry(test.suite.as_str()).or_insert(0.0) += test.elapsed_seconds;
    }

    let mut out: Vec<SuiteTime> = totals
        .into_iter()
        .map(|(suite, seconds)| SuiteTime {
            suite: suite.to_string(),
            seconds,
        })
        .collect();
    out.sort_by(|a, b| descending(a.seconds, b.seconds));
    out
}

/// The ten slowest tests, returned fastest-first so the slowest is last.
///
/// The ascending tail order suits horizontal bar charts that draw bottom-up.
pub fn slowest_tests(tests: &[CanonicalTestResult]) -> Vec<&CanonicalTestResult> {
    let mut sorted: Vec<&CanonicalTestResult> = tests.iter().collect();
    sorted.sort_by(|a, b| descending(a.elapsed_seconds, b.elapsed_seconds));
    sorted.truncate(SLOWEST_LIMIT);
    sorted.reverse();
    sorted
}

/// Suites to chart: the caller's list, or every suite seen in `tests`.
///
/// Either way each suite appears once, in first-seen order.
pub fn resolve_tracked_suites(tests: &[CanonicalTestResult], requested: &[String]) -> Vec<String> {
    let candidates: Vec<&String> = if requested.is_empty() {
        tests.iter().map(|t| &t.suite).collect()
    } else {
        requested.iter().collect()
    };

    let mut seen: Vec<String> = Vec::new();
    for suite in candidates {
        if !seen.contains(suite) {
            seen.push(suite.clone());
        }
    }
    seen
}

/// Pass/fail counts restricted to `tracked`, in `tracked` order.
///
/// Tracked suites with no tests report zero counts.
pub fn suite_results(
    tests: &[CanonicalTestResult],
    tracked: &[String],
) -> IndexMap<String, SuiteCounts> {
    let mut counts: IndexMap<String, SuiteCounts> = tracked
        .iter()
        .map(|suite| (suite.clone(), SuiteCounts::default()))
        .collect();

    for test in tests {
        if let Some(entry) = counts.get_mut(&test.suite) {
            if test.is_pass() {
                entry.passed += 1;
            } else {
                entry.failed += 1;
            }
        }
    }
    counts
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
