//! Route handlers.

pub mod analyze;
pub mod execute;
pub mod health;
