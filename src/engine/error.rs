//! Error types for the synthesis engine.

use thiserror::Error;

/// Errors surfaced by the synthesis dispatcher.
///
/// Propagation is fail-fast: nothing in this crate retries or downgrades
/// a tier on failure; errors reach the caller unmodified.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The supplied strategy name is not one of the four known tiers.
    #[error("unknown risk strategy: {value:?}")]
    UnknownStrategy { value: String },

    /// A tier executor rejected the request.
    ///
    /// The built-in executors default their way past any malformed input
    /// and never return this; it is the seam for real gating logic.
    #[error("{strategy} executor failed: {message}")]
    ExecutorFailed {
        strategy: &'static str,
        message: String,
    },
}

impl SynthesisError {
    /// Create an unknown-strategy error.
    pub fn unknown_strategy(value: impl Into<String>) -> Self {
        Self::UnknownStrategy {
            value: value.into(),
        }
    }

    /// Create an executor failure.
    pub fn executor_failed(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::ExecutorFailed {
            strategy,
            message: message.into(),
        }
    }

    /// Short error code for logs and audit records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownStrategy { .. } => "unknown_strategy",
            Self::ExecutorFailed { .. } => "executor_failed",
        }
    }
}
