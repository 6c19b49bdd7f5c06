//! Code analysis requests, prompt templates and outcomes.

pub mod model;
pub mod prompt;

pub use model::{
    AnalysisOutcome, AnalysisRequest, AnalysisResult, AnalysisType, AnalyzePayload, StatusClass,
};

/// Returned when generation completes without usable text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "AI returned an empty response.";

/// Returned when the provider stops for safety reasons.
pub const SAFETY_BLOCK_MESSAGE: &str =
    "AI response blocked due to safety filters. Please modify the code or prompt.";

/// Returned when the provider stops for recitation reasons.
pub const RECITATION_BLOCK_MESSAGE: &str = "AI response blocked due to potential recitation issues.";

/// Returned for any other abnormal stop.
pub const GENERIC_BLOCK_MESSAGE: &str =
    "AI response blocked, possibly due to safety settings or prompt issues.";

/// Block reason reported when the provider gives none.
pub const UNKNOWN_BLOCK_REASON: &str = "Unknown reason (possibly blocked)";

/// Prefix for transport and provider failures.
pub const SERVICE_FAILURE_PREFIX: &str = "Failed to get response from AI service.";

/// Pick the caller-facing message for a block reason.
pub fn block_message(reason: &str) -> &'static str {
    match reason {
        "SAFETY" => SAFETY_BLOCK_MESSAGE,
        "RECITATION" => RECITATION_BLOCK_MESSAGE,
        _ => GENERIC_BLOCK_MESSAGE,
    }
}
