//! # Campus Bridge Clients
//!
//! Outbound HTTP clients: Gemini text generation behind the
//! [`campus_core::TextGenerator`] seam, and the external code runner.

pub mod execution;
pub mod gemini;

pub use execution::{ExecutionClient, ExecutionError, ExecutionReport, ExecutionRequest};
pub use gemini::GeminiClient;
