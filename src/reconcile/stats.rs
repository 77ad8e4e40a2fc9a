use serde::{Deserialize, Serialize};

use crate::reconcile::canonical::{CanonicalTestResult, Classification};

/// Run-wide counts over canonical results.
///
/// Always satisfies `total == passed_first_try + initial_failures` and
/// `initial_failures == recovered + final_failures`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total: usize,
    pub passed_first_try: usize,
    pub initial_failures: usize,
    pub recovered: usize,
    pub final_failures: usize,
}

impl RunStatistics {
    /// Single pass over the canonical list.
    pub fn from_results(results: &[CanonicalTestResult]) -> Self {
        let mut stats = RunStatistics::default();
        for result in results {
            stats.total += 1;
            match result.classification() {
                Classification::PassedFirstTry => stats.passed_first_try += 1,
                Classification::Recovered => stats.recovered += 1,
                Classification::FailedFinally => stats.final_failures += 1,
            }
        }
        stats.initial_failures = stats.recovered + stats.final_failures;
        stats
    }

    /// Tests whose reconciled outcome is a pass.
    pub fn total_passed(&self) -> usize {
        self.passed_first_try + self.recovered
    }

    pub fn all_passed(&self) -> bool {
        self.final_failures == 0
    }
}
