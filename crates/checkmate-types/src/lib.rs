//! Shared vocabulary types for the checkmate constraint oracle.
//!
//! Everything in this crate is plain data: candidate values, the closed
//! operator/function/type enums extracted from CHECK clauses, normalized
//! predicates with their verdicts, and the execution-outcome contract the
//! fitness scorer consumes. No I/O, no engine access.

pub mod outcome;
pub mod predicate;
pub mod sql;
pub mod value;

pub use outcome::{
    BENIGN_ERROR_CODES, ER_CHECK_CONSTRAINT_VIOLATED, ER_PARSE_ERROR, ExecutionOutcome,
};
pub use predicate::{FailureKind, Predicate, Verdict};
pub use sql::{ColumnType, SqlFunction, SqlOperator};
pub use value::CandidateValue;
