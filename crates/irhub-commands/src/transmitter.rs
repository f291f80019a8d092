//! Transmitter client.
//!
//! Forwards a resolved IR code to the external relay that drives the IR
//! blaster. One attempt per call, bounded by a timeout, never retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use irhub_core::config::defaults;
use irhub_core::{Error, Result};

/// Why the relay could not be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    /// No response within the timeout.
    Timeout,
    /// Connection refused, DNS failure and similar.
    Connect(String),
    /// Any other transport failure, including an unusable endpoint URL.
    Other(String),
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmitOutcome {
    /// No endpoint configured; nothing was sent.
    NotConfigured,
    /// The relay answered with a 2xx status.
    Delivered,
    /// The relay answered with a non-success status.
    Rejected(u16),
    Unreachable(UnreachableReason),
}

impl TransmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, TransmitOutcome::Delivered)
    }

    /// Human-readable description shown to the caller.
    pub fn message(&self) -> String {
        match self {
            TransmitOutcome::NotConfigured => "IR endpoint not configured in settings".to_string(),
            TransmitOutcome::Delivered => "IR command sent successfully".to_string(),
            TransmitOutcome::Rejected(status) => format!("IR device returned status {}", status),
            TransmitOutcome::Unreachable(UnreachableReason::Timeout) => {
                "Timeout connecting to IR device".to_string()
            }
            TransmitOutcome::Unreachable(UnreachableReason::Connect(_)) => {
                "Could not connect to IR device".to_string()
            }
            TransmitOutcome::Unreachable(UnreachableReason::Other(reason)) => {
                format!("Error sending IR command: {}", reason)
            }
        }
    }
}

/// Delivers IR codes to an external transmitter.
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// Send `code` for `device_name` to `endpoint`.
    ///
    /// A missing or blank endpoint yields [`TransmitOutcome::NotConfigured`].
    async fn send(&self, endpoint: Option<&str>, code: &str, device_name: &str) -> TransmitOutcome;
}

/// Body posted to the relay.
#[derive(Debug, Serialize)]
struct TransmitPayload<'a> {
    code: &'a str,
    device: &'a str,
}

/// Transmitter that POSTs JSON to an HTTP relay.
#[derive(Debug, Clone)]
pub struct HttpTransmitter {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransmitter {
    /// Create a transmitter with the default 5 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(defaults::TRANSMITTER_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, timeout))
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn classify(e: &reqwest::Error) -> UnreachableReason {
    if e.is_timeout() {
        UnreachableReason::Timeout
    } else if e.is_connect() {
        UnreachableReason::Connect(e.to_string())
    } else {
        UnreachableReason::Other(e.to_string())
    }
}

#[async_trait]
impl Transmitter for HttpTransmitter {
    async fn send(&self, endpoint: Option<&str>, code: &str, device_name: &str) -> TransmitOutcome {
        let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) else {
            tracing::warn!(device = device_name, "IR endpoint not configured, command not sent");
            return TransmitOutcome::NotConfigured;
        };

        let payload = TransmitPayload {
            code,
            device: device_name,
        };
        let result = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await;

        let outcome = match result {
            Ok(response) if response.status().is_success() => TransmitOutcome::Delivered,
            Ok(response) => TransmitOutcome::Rejected(response.status().as_u16()),
            Err(e) => TransmitOutcome::Unreachable(classify(&e)),
        };

        match &outcome {
            TransmitOutcome::Delivered => {
                tracing::info!(endpoint, device = device_name, "IR command delivered");
            }
            TransmitOutcome::Rejected(status) => {
                tracing::warn!(endpoint, device = device_name, status, "IR relay rejected command");
            }
            TransmitOutcome::Unreachable(reason) => {
                tracing::warn!(endpoint, device = device_name, ?reason, "IR relay unreachable");
            }
            TransmitOutcome::NotConfigured => {}
        }
        outcome
    }
}
