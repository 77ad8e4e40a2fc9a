//! Reconcile multi-attempt JUnit results into per-test outcomes, then
//! render them as an HTML dashboard or a webhook text digest.
//!
//! Pipeline: [`junit`] parses attempts, [`reconcile`] reduces them to one
//! record per logical test, [`aggregate`] derives rankings, and [`report`]
//! formats the output model.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod junit;
pub mod reconcile;
pub mod report;
pub mod webhook;

pub use error::ReportError;
pub use junit::attempt::{AttemptRecord, Outcome, ParsedRun, TestIdentity};
pub use reconcile::canonical::CanonicalTestResult;
pub use reconcile::engine::{RunSummary, reconcile};
pub use reconcile::mode::ReconcileMode;
pub use reconcile::stats::RunStatistics;
