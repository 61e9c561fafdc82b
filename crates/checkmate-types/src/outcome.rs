//! The execution-outcome contract between the external SQL executor and the
//! fitness scorer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine error code for a SQL syntax error.
pub const ER_PARSE_ERROR: u16 = 1064;

/// Engine error code for a CHECK-constraint violation.
pub const ER_CHECK_CONSTRAINT_VIOLATED: u16 = 3819;

/// Coercion-warning codes that routinely accompany boundary probing and
/// carry no error-diversity signal: out-of-range value, incorrect value for
/// column, and data too long.
pub const BENIGN_ERROR_CODES: [u16; 3] = [1264, 1366, 1406];

/// What the execution backend observed while running one generated
/// statement. The oracle never executes SQL itself; callers fill this in
/// from their own connection and hand it to the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Engine error code; `None` on success.
    pub error_code: Option<u16>,
    /// Rows affected by the statement.
    pub rows_affected: u64,
    /// Wall-clock execution time.
    pub elapsed: Duration,
    /// Whether re-executing an accepted statement was also accepted (the
    /// UNIQUE double-insert probe); `None` when the probe did not run.
    pub duplicate_accepted: Option<bool>,
}

impl ExecutionOutcome {
    /// An accepted statement.
    #[must_use]
    pub const fn success(rows_affected: u64, elapsed: Duration) -> Self {
        Self {
            error_code: None,
            rows_affected,
            elapsed,
            duplicate_accepted: None,
        }
    }

    /// A rejected statement.
    #[must_use]
    pub const fn failure(error_code: u16, elapsed: Duration) -> Self {
        Self {
            error_code: Some(error_code),
            rows_affected: 0,
            elapsed,
            duplicate_accepted: None,
        }
    }

    /// True when the statement executed without error.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error_code.is_none()
    }

    /// True for a syntax rejection (the generated statement itself was
    /// malformed; no signal about constraint enforcement).
    #[must_use]
    pub fn is_syntax_error(&self) -> bool {
        self.error_code == Some(ER_PARSE_ERROR)
    }

    /// True when the engine rejected the row for violating a CHECK
    /// constraint.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        self.error_code == Some(ER_CHECK_CONSTRAINT_VIOLATED)
    }

    /// True for any error outside the expected set (syntax, constraint
    /// violation, benign coercion warnings): the error-diversity signal.
    #[must_use]
    pub fn is_unexpected_error(&self) -> bool {
        match self.error_code {
            None => false,
            Some(code) => {
                code != ER_PARSE_ERROR
                    && code != ER_CHECK_CONSTRAINT_VIOLATED
                    && !BENIGN_ERROR_CODES.contains(&code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_shape() {
        let o = ExecutionOutcome::success(1, Duration::from_millis(3));
        assert!(o.passed());
        assert!(!o.is_syntax_error());
        assert!(!o.is_constraint_violation());
        assert!(!o.is_unexpected_error());
        assert_eq!(o.rows_affected, 1);
    }

    #[test]
    fn error_classification() {
        let syntax = ExecutionOutcome::failure(ER_PARSE_ERROR, Duration::ZERO);
        assert!(syntax.is_syntax_error());
        assert!(!syntax.is_unexpected_error());

        let check = ExecutionOutcome::failure(ER_CHECK_CONSTRAINT_VIOLATED, Duration::ZERO);
        assert!(check.is_constraint_violation());
        assert!(!check.is_unexpected_error());

        for code in BENIGN_ERROR_CODES {
            assert!(!ExecutionOutcome::failure(code, Duration::ZERO).is_unexpected_error());
        }

        // Lock wait timeout, for instance, is diversity signal.
        assert!(ExecutionOutcome::failure(1205, Duration::ZERO).is_unexpected_error());
    }
}
