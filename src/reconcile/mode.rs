use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How repeated attempts of one logical test should be read.
///
/// The attempt list looks the same in both cases, and a host label may or
/// may not be present in either, so the mode is always chosen by the
/// caller and never guessed from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileMode {
    /// Sequential retries in one environment: the last attempt decides.
    #[default]
    Retry,

    /// One attempt per browser/host: any pass means the test works.
    MultiEnv,
}

impl ReconcileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReconcileMode::Retry => "retry",
            ReconcileMode::MultiEnv => "multi-env",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReconcileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retry" => Ok(ReconcileMode::Retry),
            "multi-env" | "multi_env" | "multienv" => Ok(ReconcileMode::MultiEnv),
            other => Err(format!(
                "unknown reconcile mode '{}' (expected 'retry' or 'multi-env')",
                other
            )),
        }
    }
}
