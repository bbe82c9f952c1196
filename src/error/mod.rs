//! Error module orchestrator.

mod types;

pub use types::{BentoError, Result};
