use std::time::Duration;

use serde::Serialize;

use crate::error::ReportError;

/// Environment variable holding the destination URL.
pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Body accepted by Discord/Slack-style incoming webhooks.
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// One-shot webhook sender. No queueing, no retry.
pub struct WebhookClient {
    url: String,
    http: reqwest::blocking::Client,
}

impl WebhookClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Build a client from `WEBHOOK_URL`.
    ///
    /// Fails before any network activity when the variable is unset or blank.
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_url(std::env::var(WEBHOOK_URL_VAR).ok())
    }

    /// Build a client from an optional URL, treating blank as missing.
    pub fn from_url(url: Option<String>) -> Result<Self, ReportError> {
        match url.map(|u| u.trim().to_string()) {
            Some(u) if !u.is_empty() => Ok(Self::new(&u)),
            _ => Err(ReportError::MissingWebhookUrl),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{"content": text}` once.
    pub fn send(&self, text: &str) -> Result<(), ReportError> {
        tracing::info!("sending report to webhook");
        let response = self
            .http
            .post(&self.url)
            .timeout(SEND_TIMEOUT)
            .json(&WebhookMessage { content: text })
            .send()
            .map_err(|source| ReportError::Delivery {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::DeliveryStatus {
                status: status.as_u16(),
            });
        }
        tracing::info!("report delivered ({})", status);
        Ok(())
    }
}
