//! Error taxonomy for the checkmate constraint oracle.
//!
//! The evaluator itself is total (coercion failures degrade into
//! `TypeError` verdicts and are never raised), so the error types here
//! cover the two places a `Result` actually crosses an API boundary: the
//! engine-session seam and catalog construction.

use thiserror::Error;

/// Errors at the engine-session boundary.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection could not be established within the retry budget.
    /// Fatal for the current schema cycle, not for the process.
    #[error("failed to connect to the engine after {attempts} attempts: {detail}")]
    ConnectionExhausted {
        /// Attempts made before giving up.
        attempts: u32,
        /// The final connection error.
        detail: String,
    },

    /// A metadata or scalar query was rejected by the engine.
    #[error("engine query failed: {detail}")]
    Query {
        /// Engine-reported failure text.
        detail: String,
    },
}

impl BackendError {
    /// Convenience constructor for query failures.
    #[must_use]
    pub fn query(detail: impl Into<String>) -> Self {
        Self::Query {
            detail: detail.into(),
        }
    }
}

/// Failure to bring a candidate/operand pair into one comparable domain.
///
/// Always recovered locally into a `(false, name, TypeError)` verdict;
/// never surfaced to callers of the evaluator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionError {
    /// The value is not a clean numeric literal where one is required.
    /// Mirrors the engine's own rejection text.
    #[error("Data truncated for column")]
    Truncated,
}

/// Unified error for callers that want a single type at the facade.
#[derive(Error, Debug)]
pub enum CheckmateError {
    /// Engine-session failure during catalog construction.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Coercion failure, for callers driving the coercion engine directly.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}
