//! The engine-session seam.
//!
//! The oracle needs exactly two things from a live engine: the CHECK
//! constraint rows for one table/column, and scalar pre-evaluation of
//! `SELECT func(literal)`. Both sit behind [`EngineSession`] so the catalog
//! can be built against a real connection in production and an in-memory
//! stub in tests.
//!
//! Connection establishment is the caller's job; [`connect_with_retry`]
//! wraps it in the bounded, exponentially delayed retry policy the external
//! connector uses. Exhaustion is fatal for the schema cycle, not the
//! process.

use std::thread;
use std::time::Duration;

use checkmate_error::BackendError;
use checkmate_types::SqlFunction;
use tracing::{info, warn};

/// One CHECK-constraint row from the engine's metadata store (the
/// `TABLE_CONSTRAINTS` / `CHECK_CONSTRAINTS` / `COLUMNS` join, filtered by
/// schema, table, and column).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConstraintRow {
    /// Owning table.
    pub table_name: String,
    /// Constraint name (`CONSTRAINT_NAME`).
    pub constraint_name: String,
    /// Stored clause text (`CHECK_CLAUSE`).
    pub check_clause: String,
    /// Constrained column (`COLUMN_NAME`).
    pub column_name: String,
    /// Declared type string (`DATA_TYPE`).
    pub data_type: String,
}

/// A live engine session able to answer the two queries the oracle needs.
///
/// The catalog consumes the session during construction and drops it
/// immediately afterwards; the oracle holds no connection of its own.
pub trait EngineSession {
    /// Fetch every CHECK constraint declared on `column` of `table`, in
    /// discovery order.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the metadata query fails.
    fn fetch_check_constraints(
        &mut self,
        table: &str,
        column: &str,
    ) -> Result<Vec<ConstraintRow>, BackendError>;

    /// Evaluate `SELECT func(literal)` on the live engine and return the
    /// engine-rendered scalar, or `None` when the engine returns no row.
    /// This is how transform operands inherit the engine's own floating
    /// point and function semantics, bit for bit.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the engine rejects the expression.
    fn eval_scalar(
        &mut self,
        func: SqlFunction,
        literal: &str,
    ) -> Result<Option<String>, BackendError>;
}

/// Reconnect policy for session establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RetryPolicy {
    /// Maximum connection attempts before giving up.
    pub attempts: u32,
    /// Base delay; failed attempt `n` (1-based) sleeps `base_delay` raised
    /// to the `n`th power.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Progressive delay after failed attempt `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::from_secs_f64(self.base_delay.as_secs_f64().powi(exponent))
    }
}

/// Establish a session with bounded, exponentially delayed retries.
///
/// # Errors
///
/// Returns [`BackendError::ConnectionExhausted`] carrying the final
/// connection error once `policy.attempts` attempts have failed.
pub fn connect_with_retry<S, E, F>(policy: &RetryPolicy, mut connect: F) -> Result<S, BackendError>
where
    F: FnMut() -> Result<S, E>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match connect() {
            Ok(session) => {
                info!(attempt, "engine session established");
                return Ok(session);
            }
            Err(err) if attempt >= policy.attempts => {
                warn!(attempt, error = %err, "connection attempts exhausted");
                return Err(BackendError::ConnectionExhausted {
                    attempts: policy.attempts,
                    detail: err.to_string(),
                });
            }
            Err(err) => {
                let delay = policy.delay_for(attempt);
                warn!(attempt, error = %err, ?delay, "connection failed, retrying");
                thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
