//! Analysis gateway: request -> prompt -> generation -> validated outcome.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::analysis::{
    block_message, AnalysisOutcome, AnalysisRequest, SERVICE_FAILURE_PREFIX, UNKNOWN_BLOCK_REASON,
};
use crate::generation::{Generation, TextGenerator};

/// Maximum number of characters of submitted code echoed into debug logs.
pub const PREVIEW_CHARS: usize = 500;

/// Forwards analysis requests to a [`TextGenerator`].
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct AnalysisGateway {
    generator: Arc<dyn TextGenerator>,
}

impl AnalysisGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Run one analysis. Never fails; every fault becomes an outcome.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        info!(
            analysis_type = %request.analysis_type,
            language = %request.language,
            code_len = request.code.len(),
            model = %self.generator.model_name(),
            "Analyzing code"
        );
        debug!(preview = %preview(&request.code, PREVIEW_CHARS), "Submitted code");

        let prompt = request
            .analysis_type
            .prompt(&request.language, &request.code);

        match self.generator.generate(&prompt).await {
            Ok(generation) => evaluate(generation),
            Err(e) => {
                error!(error = %e, "Generation request failed");
                AnalysisOutcome::Failed(format!("{} {}", SERVICE_FAILURE_PREFIX, e))
            }
        }
    }
}

/// Validate a provider response into an outcome.
pub fn evaluate(generation: Generation) -> AnalysisOutcome {
    let completed = generation
        .first()
        .filter(|candidate| candidate.finish_reason.is_normal());

    let Some(candidate) = completed else {
        return blocked(&generation);
    };

    let text = candidate.text.trim();
    if text.is_empty() {
        warn!("Received empty text response from provider");
        return AnalysisOutcome::Empty;
    }

    debug!(result_len = text.len(), "Generation completed");
    AnalysisOutcome::Completed(text.to_string())
}

fn blocked(generation: &Generation) -> AnalysisOutcome {
    let first = generation.first();

    let reason = first
        .and_then(|candidate| candidate.finish_reason.as_str())
        .or(generation.prompt_feedback.block_reason.as_deref())
        .unwrap_or(UNKNOWN_BLOCK_REASON)
        .to_string();

    let safety_ratings = if generation.prompt_feedback.safety_ratings.is_empty() {
        first
            .map(|candidate| candidate.safety_ratings.clone())
            .unwrap_or_default()
    } else {
        generation.prompt_feedback.safety_ratings.clone()
    };

    warn!(
        reason = %reason,
        ratings = safety_ratings.len(),
        "Generation stopped or blocked"
    );

    AnalysisOutcome::Blocked {
        message: block_message(&reason).to_string(),
        reason,
        safety_ratings,
    }
}

/// First `max_chars` characters of `text`, with an ellipsis if cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
