//! Analysis data models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CampusError, CampusResult};

/// Language tag used when the caller does not send one.
pub const DEFAULT_LANGUAGE: &str = "code";

/// Message returned when the submitted code is missing or blank.
pub const INVALID_CODE_MESSAGE: &str = "Valid, non-empty code snippet is required.";

/// Requested feedback mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Review,
    Debug,
    Hint,
}

impl AnalysisType {
    /// Map a raw selector to a mode. Unknown or missing selectors review.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("hint") => Self::Hint,
            Some("debug") => Self::Debug,
            _ => Self::Review,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Debug => "debug",
            Self::Hint => "hint",
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated analysis request. Lives for a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
    pub analysis_type: AnalysisType,
}

impl AnalysisRequest {
    /// Build a request, rejecting blank code.
    ///
    /// The code itself is kept untrimmed; only the emptiness check trims.
    pub fn new(
        code: impl Into<String>,
        language: Option<&str>,
        analysis_type: AnalysisType,
    ) -> CampusResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CampusError::validation(INVALID_CODE_MESSAGE));
        }

        Ok(Self {
            code,
            language: language.unwrap_or(DEFAULT_LANGUAGE).to_string(),
            analysis_type,
        })
    }
}

/// JSON body accepted by `POST /api/ai/analyze`.
///
/// Every field is taken as an arbitrary JSON value: non-string `code` is
/// reported as a validation error, an odd `analysisType` falls back to review
/// and a non-string `language` is rendered as its JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzePayload {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default, rename = "analysisType")]
    pub analysis_type: Option<Value>,
}

impl AnalyzePayload {
    /// Validate the payload into an [`AnalysisRequest`].
    pub fn into_request(self) -> CampusResult<AnalysisRequest> {
        let code = match self.code {
            Some(Value::String(code)) => code,
            _ => return Err(CampusError::validation(INVALID_CODE_MESSAGE)),
        };

        let language = match self.language {
            Some(Value::String(language)) => Some(language),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        let selector = self.analysis_type.as_ref().and_then(Value::as_str);

        AnalysisRequest::new(
            code,
            language.as_deref(),
            AnalysisType::from_selector(selector),
        )
    }
}

/// HTTP-independent classification of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
}

/// Result of one trip through the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Generation finished normally; holds the trimmed text.
    Completed(String),
    /// The request was rejected before any generation call.
    Invalid(String),
    /// The provider declined to complete.
    Blocked {
        reason: String,
        message: String,
        safety_ratings: Vec<Value>,
    },
    /// The provider completed with no usable text.
    Empty,
    /// Transport, provider or decode failure.
    Failed(String),
}

impl AnalysisOutcome {
    pub fn status_class(&self) -> StatusClass {
        match self {
            Self::Completed(_) => StatusClass::Success,
            Self::Invalid(_) | Self::Blocked { .. } => StatusClass::ClientError,
            Self::Empty | Self::Failed(_) => StatusClass::ServerError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Convert into the wire payload.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::Completed(text) => AnalysisResult {
                success: true,
                result: Some(text),
                ..Default::default()
            },
            Self::Invalid(message) | Self::Failed(message) => AnalysisResult::error(message),
            Self::Blocked {
                reason,
                message,
                safety_ratings,
            } => AnalysisResult {
                block_reason: Some(reason),
                safety_ratings: Some(safety_ratings),
                ..AnalysisResult::error(message)
            },
            Self::Empty => AnalysisResult::error(super::EMPTY_RESPONSE_MESSAGE),
        }
    }
}

/// Response body of `POST /api/ai/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<Value>>,
}

impl AnalysisResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}
