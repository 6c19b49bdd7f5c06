//! Campus Bridge Core Library
//!
//! Prompt-templated code analysis: request validation, template selection,
//! provider response validation and the generator seam.

pub mod analysis;
pub mod config;
pub mod error;
pub mod gateway;
pub mod generation;

pub use analysis::{AnalysisOutcome, AnalysisRequest, AnalysisResult, AnalysisType, StatusClass};
pub use config::{Environment, GatewayConfig};
pub use error::{CampusError, CampusResult};
pub use gateway::AnalysisGateway;
pub use generation::{FinishReason, Generation, GenerationError, TextGenerator};
