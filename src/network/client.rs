//! Execution client - posts dispatch payloads to the backend and decodes results

use std::fmt;
use std::time::{Duration, Instant};

use crate::constants::FALLBACK_ERROR;
use crate::models::{DispatchPayload, ResponseResult};

/// Failure to obtain a result from the execution backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportError(pub String);

impl TransportError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

/// Client bound to one execution backend endpoint
#[derive(Clone, Debug)]
pub struct ExecutionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ExecutionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        ExecutionClient {
            client: create_client(timeout),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Dispatch and return the decoded result, or what went wrong
    pub async fn dispatch(&self, payload: &DispatchPayload) -> Result<ResponseResult, TransportError> {
        let start = Instant::now();
        let result = self.client.post(&self.endpoint).json(payload).send().await;

        let resp = result.map_err(|e| {
            let msg = if e.is_timeout() {
                "Execution backend timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            TransportError(msg)
        })?;

        let proxy_status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError(format!("Error reading body: {}", e)))?;
        tracing::debug!(
            status = proxy_status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend replied"
        );

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| TransportError(format!("Invalid response from backend: {}", e)))?;

        if !proxy_status.is_success() {
            return Err(TransportError(backend_error(&value).unwrap_or(FALLBACK_ERROR).to_string()));
        }
        if let Some(message) = backend_error(&value) {
            return Err(TransportError(message.to_string()));
        }

        serde_json::from_value(value)
            .map_err(|e| TransportError(format!("Invalid response from backend: {}", e)))
    }

    /// Dispatch, folding any failure into an `ERROR` result
    pub async fn send(&self, payload: &DispatchPayload) -> ResponseResult {
        self.dispatch(payload)
            .await
            .unwrap_or_else(|e| ResponseResult::error(e.0))
    }
}

fn backend_error(value: &serde_json::Value) -> Option<&str> {
    value.get("error").and_then(|e| e.as_str())
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
