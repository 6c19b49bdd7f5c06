//! Text generation seam.
//!
//! Providers translate their own response format into [`Generation`] so the
//! gateway never touches provider field names.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Why the provider stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Normal completion.
    Stop,
    Safety,
    Recitation,
    /// Any other provider value, kept verbatim.
    Other(String),
    /// The provider did not report a reason.
    Unspecified,
}

impl FinishReason {
    /// Parse a provider finish reason string.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Unspecified,
            Some("STOP") => Self::Stop,
            Some("SAFETY") => Self::Safety,
            Some("RECITATION") => Self::Recitation,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Stop => Some("STOP"),
            Self::Safety => Some("SAFETY"),
            Self::Recitation => Some("RECITATION"),
            Self::Other(raw) => Some(raw),
            Self::Unspecified => None,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCandidate {
    pub finish_reason: FinishReason,
    /// All text parts, concatenated in order.
    pub text: String,
    pub safety_ratings: Vec<Value>,
}

/// Provider feedback about the prompt itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
    pub safety_ratings: Vec<Value>,
}

/// Normalized provider response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    pub candidates: Vec<GenerationCandidate>,
    pub prompt_feedback: PromptFeedback,
}

impl Generation {
    /// A single normally-completed candidate. Handy for stubs.
    pub fn completed(text: impl Into<String>) -> Self {
        Self::single(FinishReason::Stop, text)
    }

    pub fn single(finish_reason: FinishReason, text: impl Into<String>) -> Self {
        Self {
            candidates: vec![GenerationCandidate {
                finish_reason,
                text: text.into(),
                safety_ratings: Vec::new(),
            }],
            prompt_feedback: PromptFeedback::default(),
        }
    }

    pub fn first(&self) -> Option<&GenerationCandidate> {
        self.candidates.first()
    }
}

/// Failure to obtain a [`Generation`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// Something that turns a prompt into a [`Generation`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Whether the backing service is reachable and the model exists.
    async fn health_check(&self) -> Result<bool, GenerationError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_parse() {
        assert_eq!(FinishReason::parse(Some("STOP")), FinishReason::Stop);
        assert_eq!(FinishReason::parse(Some("SAFETY")), FinishReason::Safety);
        assert_eq!(FinishReason::parse(Some("RECITATION")), FinishReason::Recitation);
        assert_eq!(FinishReason::parse(Some("MAX_TOKENS")), FinishReason::Other("MAX_TOKENS".into()));
        assert_eq!(FinishReason::parse(None), FinishReason::Unspecified);
        assert_eq!(FinishReason::parse(Some("")), FinishReason::Unspecified);
    }

    #[test]
    fn test_only_stop_is_normal() {
        assert!(FinishReason::Stop.is_normal());
        assert!(!FinishReason::Safety.is_normal());
        assert!(!FinishReason::Other("OTHER".into()).is_normal());
        assert!(!FinishReason::Unspecified.is_normal());
    }

    #[test]
    fn test_finish_reason_round_trips_provider_string() {
        assert_eq!(FinishReason::parse(Some("BLOCKLIST")).as_str(), Some("BLOCKLIST"));
        assert_eq!(FinishReason::Unspecified.as_str(), None);
    }
}
