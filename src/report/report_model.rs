use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::aggregate::ranking::{resolve_tracked_suites, slowest_tests, suite_results, suite_times};
use crate::reconcile::canonical::{CanonicalTestResult, Classification};
use crate::reconcile::engine::RunSummary;
use crate::reconcile::mode::ReconcileMode;
use crate::report::format::{format_hms, percentage};

/// Placeholder for run details nobody could determine.
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Dashboard model (pre-formatted values for the HTML renderer)
// ============================================================================

/// Output-ready view of a reconciled run.
///
/// Built from a [`RunSummary`] via [`DashboardModel::build`]. Holds only
/// formatted values and chart payloads; no decisions are made past this
/// point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardModel {
    pub mode: ReconcileMode,

    pub total_tests: usize,

    /// Passed first try plus recovered
    pub total_passed: usize,
    pub initial_failures: usize,
    pub recovered: usize,
    pub final_failures: usize,

    pub passed_percentage: String,

    /// Share of initial failures that recovered
    pub recovered_percentage: String,
    pub final_failures_percentage: String,

    /// `HH:MM:SS`
    pub total_execution_time: String,
    pub execution_date: String,

    pub status_distribution: StatusChart,
    pub suite_time_chart: TimedChart,
    pub suite_results_chart: SuiteResultsChart,
    pub slowest_tests_chart: TimedChart,

    /// Detail listing, suites in first-seen order
    pub suites: Vec<SuiteListing>,

    pub run_info: RunInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChart {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

/// Bar chart of durations, with `HH:MM:SS` tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedChart {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub formatted_times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteResultsChart {
    pub labels: Vec<String>,
    pub passed_data: Vec<usize>,
    pub failed_data: Vec<usize>,
}

/// One suite's collapsible block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteListing {
    pub name: String,
    pub tests: Vec<TestRow>,
    pub has_failures: bool,
}

/// One test's row inside a suite block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRow {
    pub name: String,

    /// `PASS` or `FAIL`
    pub status: String,

    /// `Passed`, `Recovered` or `Failed`
    pub status_label: String,

    /// `HH:MM:SS`
    pub elapsed: String,
    pub source_file: String,
    pub message: String,
    pub browsers: Vec<String>,
    pub attempts: usize,
}

/// Environment the run was executed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub browser: String,
    pub resolution: String,
    pub frontend_url: String,
    pub backend_url: String,
    pub workers: String,
}

impl Default for RunInfo {
    fn default() -> Self {
        Self {
            browser: NOT_AVAILABLE.to_string(),
            resolution: NOT_AVAILABLE.to_string(),
            frontend_url: NOT_AVAILABLE.to_string(),
            backend_url: NOT_AVAILABLE.to_string(),
            workers: NOT_AVAILABLE.to_string(),
        }
    }
}

impl DashboardModel {
    /// Build the model from a summary and the suites to chart.
    ///
    /// An empty `tracked_suites` charts every suite in the run.
    pub fn build(summary: &RunSummary, tracked_suites: &[String]) -> Self {
        let stats = summary.stats;
        let tests = &summary.tests;

        let status_distribution = StatusChart {
            labels: vec![
                "Passed".to_string(),
                "Recovered".to_string(),
                "Final failures".to_string(),
            ],
            data: vec![stats.passed_first_try, stats.recovered, stats.final_failures],
        };

        let times = suite_times(tests);
        let suite_time_chart = TimedChart {
            labels: times.iter().map(|t| t.suite.clone()).collect(),
            data: times.iter().map(|t| t.seconds).collect(),
            formatted_times: times.iter().map(|t| format_hms(t.seconds)).collect(),
        };

        let tracked = resolve_tracked_suites(tests, tracked_suites);
        let counts = suite_results(tests, &tracked);
        let suite_results_chart = SuiteResultsChart {
            labels: tracked.clone(),
            passed_data: counts.values().map(|c| c.passed).collect(),
            failed_data: counts.values().map(|c| c.failed).collect(),
        };

        let slowest = slowest_tests(tests);
        let slowest_tests_chart = TimedChart {
            labels: slowest.iter().map(|t| t.name.clone()).collect(),
            data: slowest.iter().map(|t| t.elapsed_seconds).collect(),
            formatted_times: slowest.iter().map(|t| format_hms(t.elapsed_seconds)).collect(),
        };

        Self {
            mode: summary.mode,
            total_tests: stats.total,
            total_passed: stats.total_passed(),
            initial_failures: stats.initial_failures,
            recovered: stats.recovered,
            final_failures: stats.final_failures,
            passed_percentage: percentage(stats.total_passed(), stats.total),
            recovered_percentage: percentage(stats.recovered, stats.initial_failures),
            final_failures_percentage: percentage(stats.final_failures, stats.total),
            total_execution_time: format_hms(summary.total_seconds),
            execution_date: summary.execution_date.clone(),
            status_distribution,
            suite_time_chart,
            suite_results_chart,
            slowest_tests_chart,
            suites: build_listings(tests),
            run_info: RunInfo::default(),
        }
    }

    /// Attach run environment details.
    pub fn with_run_info(mut self, run_info: RunInfo) -> Self {
        self.run_info = run_info;
        self
    }

    pub fn all_passed(&self) -> bool {
        self.final_failures == 0
    }
}

fn build_listings(tests: &[CanonicalTestResult]) -> Vec<SuiteListing> {
    let mut by_suite: IndexMap<&str, Vec<TestRow>> = IndexMap::new();
    for test in tests {
        by_suite
            .entry(test.suite.as_str())
            .or_default()
            .push(test_row(test));
    }

    by_suite
        .into_iter()
        .map(|(name, tests)| SuiteListing {
            name: name.to_string(),
            has_failures: tests.iter().any(|t| t.status == "FAIL"),
            tests,
        })
        .collect()
}

fn test_row(test: &CanonicalTestResult) -> TestRow {
    let status_label = match test.classification() {
        Classification::PassedFirstTry => "Passed",
        Classification::Recovered => "Recovered",
        Classification::FailedFinally => "Failed",
    };

    TestRow {
        name: test.name.clone(),
        status: test.final_status.as_str().to_string(),
        status_label: status_label.to_string(),
        elapsed: format_hms(test.elapsed_seconds),
        source_file: test.source_file.clone(),
        message: test.failure_narrative.clone(),
        browsers: test.browsers.iter().cloned().collect(),
        attempts: test.attempt_count,
    }
}
