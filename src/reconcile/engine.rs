use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::junit::attempt::{AttemptRecord, Outcome, ParsedRun, TestIdentity};
use crate::reconcile::canonical::CanonicalTestResult;
use crate::reconcile::mode::ReconcileMode;
use crate::reconcile::stats::RunStatistics;

/// Shown when a run carries no usable timestamp.
pub const UNKNOWN_DATE: &str = "N/A";

// ============================================================================
// Reconciliation engine: attempts in, one record per logical test out
// ============================================================================

/// Reduce a flat attempt list to one canonical result per logical test.
///
/// Groups keep their first-seen order, and attempts keep their input order
/// within a group, which is what "first" and "last" attempt refer to.
pub fn reconcile(attempts: &[AttemptRecord], mode: ReconcileMode) -> Vec<CanonicalTestResult> {
    group_attempts(attempts)
        .into_values()
        .filter_map(|group| match mode {
            ReconcileMode::Retry => reduce_retries(&group),
            ReconcileMode::MultiEnv => reduce_environments(&group),
        })
        .collect()
}

/// Group attempts by `(classname, name)`, preserving order.
pub fn group_attempts(attempts: &[AttemptRecord]) -> IndexMap<TestIdentity, Vec<&AttemptRecord>> {
    let mut groups: IndexMap<TestIdentity, Vec<&AttemptRecord>> = IndexMap::new();
    for attempt in attempts {
        groups
            .entry(attempt.identity.clone())
            .or_default()
            .push(attempt);
    }
    groups
}

/// Retry policy: the last attempt is the verdict.
fn reduce_retries(group: &[&AttemptRecord]) -> Option<CanonicalTestResult> {
    let first = *group.first()?;
    let last = *group.last()?;

    let any_failed = group.iter().any(|a| !a.outcome.is_pass());

    let narrative = group
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.outcome.is_pass())
        .filter_map(|(i, a)| {
            a.failure_message
                .as_deref()
                .map(|msg| format!("Attempt {}:\n{}", i + 1, msg.trim()))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Some(CanonicalTestResult {
        name: last.identity.name.clone(),
        suite: last.suite_name.clone(),
        source_file: last.identity.classname.clone(),
        final_status: last.outcome,
        passed_on_first_attempt: first.outcome.is_pass(),
        recovered: last.outcome.is_pass() && any_failed,
        elapsed_seconds: last.elapsed_seconds,
        failure_narrative: narrative,
        browsers: BTreeSet::new(),
        attempt_count: group.len(),
    })
}

/// Multi-environment policy: a pass anywhere is a pass.
fn reduce_environments(group: &[&AttemptRecord]) -> Option<CanonicalTestResult> {
    let first = *group.first()?;

    let any_passed = group.iter().any(|a| a.outcome.is_pass());
    let any_failed = group.iter().any(|a| !a.outcome.is_pass());
    let mean = group.iter().map(|a| a.elapsed_seconds).sum::<f64>() / group.len() as f64;

    let narrative = group
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.outcome.is_pass())
        .filter_map(|(i, a)| {
            let origin = match a.host_label.as_deref() {
                Some(host) => format!("[{}]", host),
                None => format!("Attempt {}", i + 1),
            };
            a.failure_message
                .as_deref()
                .map(|msg| format!("{}:\n{}", origin, msg.trim()))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Some(CanonicalTestResult {
        name: first.identity.name.clone(),
        suite: first.suite_name.clone(),
        source_file: first.identity.classname.clone(),
        final_status: if any_passed { Outcome::Pass } else { Outcome::Fail },
        passed_on_first_attempt: !any_failed,
        recovered: any_passed && any_failed,
        elapsed_seconds: mean,
        failure_narrative: narrative,
        browsers: group
            .iter()
            .filter_map(|a| a.host_label.clone())
            .collect(),
        attempt_count: group.len(),
    })
}

// ============================================================================
// Run summary
// ============================================================================

/// Reconciled view of one results document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub mode: ReconcileMode,
    pub tests: Vec<CanonicalTestResult>,
    pub stats: RunStatistics,

    /// Declared run duration, not a sum of test times
    pub total_seconds: f64,

    /// `DD/MM/YYYY` from the first suite timestamp, or `N/A`
    pub execution_date: String,
}

impl RunSummary {
    /// Reconcile a parsed document. An empty run gives an all-zero summary.
    pub fn from_run(run: &ParsedRun, mode: ReconcileMode) -> Self {
        let tests = reconcile(&run.attempts, mode);
        let stats = RunStatistics::from_results(&tests);
        tracing::debug!(
            "reconciled {} attempts into {} tests ({} mode)",
            run.attempts.len(),
            tests.len(),
            mode
        );

        Self {
            mode,
            tests,
            stats,
            total_seconds: run.total_seconds(),
            execution_date: run
                .first_timestamp()
                .and_then(format_execution_date)
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Final failures in canonical order.
    pub fn failed_tests(&self) -> impl Iterator<Item = &CanonicalTestResult> {
        self.tests.iter().filter(|t| !t.is_pass())
    }
}

/// Format a suite timestamp as `DD/MM/YYYY`.
///
/// Accepts RFC 3339 (`2024-05-01T12:34:56.789Z`) and the zone-less form
/// some JUnit writers emit (`2024-05-01T12:34:56`).
pub fn format_execution_date(timestamp: &str) -> Option<String> {
    let ts = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.format("%d/%m/%Y").to_string());
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format("%d/%m/%Y").to_string())
}
