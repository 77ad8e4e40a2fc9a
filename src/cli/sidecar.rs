use std::path::{Path, PathBuf};

use serde_json::Value;

/// Conventional name of the runner's JSON results file.
pub const SIDECAR_FILENAME: &str = "test-results.json";

/// Default sidecar location: next to the XML results document.
pub fn default_sidecar_path(results_xml: &Path) -> PathBuf {
    match results_xml.parent() {
        Some(dir) => dir.join(SIDECAR_FILENAME),
        None => PathBuf::from(SIDECAR_FILENAME),
    }
}

/// Worker count actually used by the run, read from the JSON sidecar.
///
/// Prefers `config.metadata.actualWorkers`, then `config.workers`.
/// A missing file or malformed JSON yields `None`.
pub fn read_worker_count(path: &Path) -> Option<u64> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("no run metadata at {}: {}", path.display(), e);
            return None;
        }
    };
    let workers = parse_worker_count(&content);
    if workers.is_none() {
        tracing::warn!("run metadata at {} has no usable worker count", path.display());
    }
    workers
}

/// See [`read_worker_count`].
pub fn parse_worker_count(json: &str) -> Option<u64> {
    let root: Value = serde_json::from_str(json).ok()?;
    let config = root.get("config")?;
    config
        .get("metadata")
        .and_then(|m| m.get("actualWorkers"))
        .and_then(Value::as_u64)
        .or_else(|| config.get("workers").and_then(Value::as_u64))
}
