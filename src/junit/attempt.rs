use serde::{Deserialize, Serialize};

// ============================================================================
// Attempt-level data model
// ============================================================================

/// Outcome of a single recorded execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
        }
    }
}

/// Identity of a logical test: the `(classname, name)` pair.
///
/// Shared by every retry and every browser run of the same test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestIdentity {
    pub classname: String,
    pub name: String,
}

impl TestIdentity {
    pub fn new(classname: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            classname: classname.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.classname, self.name)
    }
}

/// One recorded execution of a test (one retry, or one browser).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub suite_name: String,
    pub identity: TestIdentity,
    pub elapsed_seconds: f64,
    pub outcome: Outcome,

    /// Present only when `outcome` is `Fail` and the document carried text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,

    /// Browser/environment label (suite `hostname`), absent in bare runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_label: Option<String>,
}

/// Suite-level attributes as declared in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteInfo {
    pub name: String,
    pub hostname: Option<String>,
    pub declared_tests: usize,
    pub declared_failures: usize,
    pub declared_seconds: f64,
    pub timestamp: Option<String>,
}

/// Everything extracted from one results document.
///
/// A missing, empty or malformed document is represented by
/// [`ParsedRun::empty`], never by an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRun {
    /// Attempts in document order
    pub attempts: Vec<AttemptRecord>,

    /// Suites in document order
    pub suites: Vec<SuiteInfo>,

    /// `time` attribute of the root element, when present and numeric
    pub declared_seconds: Option<f64>,
}

impl ParsedRun {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Run duration: the root's declared time, else the sum of suite times.
    ///
    /// Never the sum of test times, which double-counts parallel workers.
    pub fn total_seconds(&self) -> f64 {
        match self.declared_seconds {
            Some(secs) => secs,
            None => self.suites.iter().map(|s| s.declared_seconds).sum(),
        }
    }

    /// `timestamp` of the first suite, if any.
    pub fn first_timestamp(&self) -> Option<&str> {
        self.suites.first().and_then(|s| s.timestamp.as_deref())
    }

    /// Distinct suite names in first-seen order.
    pub fn available_suites(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for suite in &self.suites {
            if !out.contains(&suite.name) {
                out.push(suite.name.clone());
            }
        }
        out
    }

    /// Distinct hostnames in first-seen order.
    pub fn executed_hosts(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for host in self.suites.iter().filter_map(|s| s.hostname.as_ref()) {
            if !host.is_empty() && !out.contains(host) {
                out.push(host.clone());
            }
        }
        out
    }
}
