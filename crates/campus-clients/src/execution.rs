//! Forwarder for the external code runner.
//!
//! The runner is a black box: requests are relayed as-is and its JSON reply
//! is passed back to the caller.

use std::time::Duration;

use campus_core::config::ExecutionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Message returned when language or code is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Language and code are required.";

/// Execution error types.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Code execution service is not configured.")]
    NotConfigured,

    #[error("{0}")]
    Invalid(String),

    #[error("runner request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("runner returned {status}: {body}")]
    Runner { status: u16, body: String },
}

/// Result type for execution operations.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Body of `POST /api/execute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
}

impl ExecutionRequest {
    /// Require a non-blank language and a present (possibly empty) code field.
    pub fn validate(&self) -> ExecutionResult<()> {
        let has_language = self
            .language
            .as_deref()
            .is_some_and(|language| !language.trim().is_empty());
        if !has_language || self.code.is_none() {
            return Err(ExecutionError::Invalid(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Runner reply. Every field is optional; unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<serde_json::Value>,
}

impl ExecutionReport {
    /// A failed report carrying `stderr`.
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            stderr: Some(stderr.into()),
            ..Default::default()
        }
    }
}

/// HTTP client for the external runner.
#[derive(Clone)]
pub struct ExecutionClient {
    url: String,
    client: reqwest::Client,
}

impl ExecutionClient {
    pub fn new(url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Build a client if a runner URL is configured.
    pub fn from_config(config: &ExecutionConfig) -> Option<Self> {
        config
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| Self::new(url.trim(), config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validate and forward one execution request.
    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult<ExecutionReport> {
        request.validate()?;

        debug!(
            url = %self.url,
            language = request.language.as_deref().unwrap_or_default(),
            "Forwarding execution request"
        );

        let response = self.client.post(&self.url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ExecutionError::Runner { status, body });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate() {
        let ok = ExecutionRequest {
            language: Some("python".into()),
            code: Some(String::new()),
            input: None,
        };
        assert!(ok.validate().is_ok());

        let missing_language = ExecutionRequest {
            code: Some("print(1)".into()),
            ..Default::default()
        };
        assert!(matches!(missing_language.validate(), Err(ExecutionError::Invalid(_))));

        let missing_code = ExecutionRequest {
            language: Some("python".into()),
            ..Default::default()
        };
        let err = missing_code.validate().unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn test_report_decodes_partial_runner_reply() {
        let report: ExecutionReport = serde_json::from_value(json!({
            "stdout": "3\n",
            "time": 0.12,
            "error_type": null
        }))
        .unwrap();
        assert_eq!(report.stdout.as_deref(), Some("3\n"));
        assert_eq!(report.time, Some(json!(0.12)));
        assert!(report.success.is_none());
    }

    #[test]
    fn test_failure_report_shape() {
        let value = serde_json::to_value(ExecutionReport::failure("boom")).unwrap();
        assert_eq!(value, json!({ "success": false, "stderr": "boom" }));
    }

    #[test]
    fn test_from_config() {
        let mut config = ExecutionConfig::default();
        assert!(ExecutionClient::from_config(&config).is_none());
        config.url = Some("  ".into());
        assert!(ExecutionClient::from_config(&config).is_none());
        config.url = Some("http://runner.local/run".into());
        let client = ExecutionClient::from_config(&config).unwrap();
        assert_eq!(client.url(), "http://runner.local/run");
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_forwarded() {
        // Unroutable URL: reaching the network would fail differently.
        let client = ExecutionClient::new("http://127.0.0.1:9/run", 1);
        let err = client.execute(&ExecutionRequest::default()).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Invalid(_)));
    }
}
