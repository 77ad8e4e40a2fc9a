use std::collections::BTreeSet;

use serde::Serialize;

use crate::junit::attempt::Outcome;

/// Where a logical test ended up, counted exactly once per test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    PassedFirstTry,
    Recovered,
    FailedFinally,
}

/// The single reconciled record for one logical test.
///
/// Only produced by [`reconcile`](crate::reconcile::engine::reconcile);
/// `#[non_exhaustive]` keeps it from being assembled by hand elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CanonicalTestResult {
    pub name: String,
    pub suite: String,

    /// Class-scoped name (the test file for Playwright runs)
    pub source_file: String,

    pub final_status: Outcome,

    /// Retry mode: first attempt passed. Multi-env mode: passed everywhere.
    pub passed_on_first_attempt: bool,

    /// At least one attempt failed and the reconciled outcome is a pass
    pub recovered: bool,

    /// Last attempt's time (retry) or mean across hosts (multi-env)
    pub elapsed_seconds: f64,

    /// Failure messages of failing attempts, each tagged with its origin
    pub failure_narrative: String,

    /// Host labels that produced an attempt; empty outside multi-env mode
    pub browsers: BTreeSet<String>,

    pub attempt_count: usize,
}

impl CanonicalTestResult {
    pub fn is_pass(&self) -> bool {
        self.final_status.is_pass()
    }

    /// Exclusive bucket used for run statistics.
    ///
    /// A final failure always wins, then recovery, so an odd sequence such
    /// as pass→fail→pass lands in exactly one bucket.
    pub fn classification(&self) -> Classification {
        if !self.is_pass() {
            Classification::FailedFinally
        } else if self.recovered {
            Classification::Recovered
        } else {
            Classification::PassedFirstTry
        }
    }
}
