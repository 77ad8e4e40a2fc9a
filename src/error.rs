use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the report pipeline.
///
/// Extraction and reconciliation never produce these for "no data"
/// conditions; they hand back empty values instead. Only I/O,
/// configuration and delivery failures end up here.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Results document does not exist
    #[error("results file not found: {}", path.display())]
    InputMissing { path: PathBuf },

    /// Results document exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document parsed to zero tests on a path that needs data
    #[error("'{}' contains no tests or could not be read", path.display())]
    NoData { path: PathBuf },

    /// `WEBHOOK_URL` is not configured
    #[error("the WEBHOOK_URL environment variable is not set")]
    MissingWebhookUrl,

    /// Transport-level failure while posting to the webhook
    #[error("failed to send report to {url}: {source}")]
    Delivery {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Webhook answered with a non-success status
    #[error("webhook responded with HTTP {status}")]
    DeliveryStatus { status: u16 },

    /// Output directory or file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chart payload serialization failed
    #[error("failed to serialize report data: {0}")]
    Serialize(#[from] serde_json::Error),
}
