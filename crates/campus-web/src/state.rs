//! Application state.

use std::sync::Arc;

use campus_clients::{ExecutionClient, GeminiClient};
use campus_core::{AnalysisGateway, Environment, GatewayConfig, TextGenerator};

/// Application state shared across handlers.
///
/// Everything in here is immutable configuration; requests never write to it.
#[derive(Clone)]
pub struct AppState {
    pub gateway: AnalysisGateway,
    pub executor: Option<ExecutionClient>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        executor: Option<ExecutionClient>,
        environment: Environment,
    ) -> Self {
        Self {
            gateway: AnalysisGateway::new(generator),
            executor,
            environment,
        }
    }

    /// Build state backed by the Gemini client and the configured runner.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let generator = Arc::new(GeminiClient::from_config(&config.gemini));
        Self::new(
            generator,
            ExecutionClient::from_config(&config.execution),
            config.server.environment,
        )
    }
}
