//! HTTP transport for remote delivery
//!
//! Serializes a [`LogEvent`] to JSON and POSTs it to the configured
//! collection endpoint with Basic authorization. The transport itself only
//! reports failures as errors; swallowing them is the dispatcher's job, so a
//! log call can never observe a delivery failure.

use crate::core::{ConfigHandle, LogEvent, LoggerError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Destination for canonical log events.
///
/// `send` is the normal path, called from a detached task that the logging
/// caller never awaits. `send_blocking` exists for contexts without an async
/// runtime, most importantly the uncaught-error hook, where a detached task
/// would not outlive the process.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, event: &LogEvent) -> Result<()>;

    fn send_blocking(&self, event: &LogEvent) -> Result<()>;
}

/// [`Transport`] that POSTs events to the configured endpoint.
///
/// Reads `url` and `credential` from the live config on every send, so
/// external config mutation is honored mid-flight.
pub struct HttpTransport {
    client: reqwest::Client,
    config: ConfigHandle,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            timeout: Duration::from_secs(5),
        }
    }

    fn check_status(status: reqwest::StatusCode, body: String) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(LoggerError::delivery(status.as_u16(), body))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, event: &LogEvent) -> Result<()> {
        let body = serde_json::to_vec(event)?;
        let response = self
            .client
            .post(self.config.url())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, format!("Basic {}", self.config.credential()))
            .timeout(self.timeout)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::check_status(status, body)
    }

    fn send_blocking(&self, event: &LogEvent) -> Result<()> {
        let body = serde_json::to_vec(event)?;
        // A fresh blocking client: this path runs on threads with no runtime,
        // including the panic hook
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client
            .post(self.config.url())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, format!("Basic {}", self.config.credential()))
            .body(body)
            .send()?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        Self::check_status(status, body)
    }
}
