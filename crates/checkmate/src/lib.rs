//! Public API facade for checkmate.
//!
//! checkmate is a differential-testing oracle for a MySQL-compatible
//! engine's CHECK-constraint evaluation. Given the constraints the engine
//! itself reports for a column, it predicts whether a candidate value
//! satisfies them by modeling the engine's implicit type-coercion
//! semantics, and folds oracle-vs-engine agreement into a fitness signal
//! for an external grammar-based evolutionary fuzzer.
//!
//! Typical per-schema-cycle flow:
//!
//! ```no_run
//! use checkmate::{
//!     CandidateValue, ConstraintCatalog, DefectLedger, FitnessScorer, RetryPolicy,
//!     connect_with_retry,
//! };
//! # struct MySession;
//! # impl checkmate::EngineSession for MySession {
//! #     fn fetch_check_constraints(&mut self, _: &str, _: &str)
//! #         -> Result<Vec<checkmate::ConstraintRow>, checkmate::BackendError> { Ok(vec![]) }
//! #     fn eval_scalar(&mut self, _: checkmate::SqlFunction, _: &str)
//! #         -> Result<Option<String>, checkmate::BackendError> { Ok(None) }
//! # }
//! # fn open_session() -> Result<MySession, std::io::Error> { Ok(MySession) }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = connect_with_retry(&RetryPolicy::default(), open_session)?;
//! let catalog = ConstraintCatalog::fetch(session, "t1", "c1")?;
//!
//! let verdicts =
//!     catalog.evaluate_value_against_constraints("c1", &CandidateValue::from(5));
//!
//! let scorer = FitnessScorer::default();
//! let mut ledger = DefectLedger::default();
//! // ... execute the generated statement elsewhere, then:
//! // let fitness = scorer.score(&statement, &outcome, &catalog, &mut ledger);
//! # let _ = (verdicts, scorer, ledger);
//! # Ok(())
//! # }
//! ```

pub use checkmate_error::{BackendError, CheckmateError, CoercionError};
pub use checkmate_fitness::{
    DEFAULT_DEFECT_CAP, Defect, DefectKind, DefectLedger, FitnessScorer, FitnessWeights,
    extract_literal, levenshtein, proximity,
};
pub use checkmate_oracle::{
    CoercionPair, ConstraintCatalog, ConstraintRow, EngineSession, Evaluator, Number,
    ParsedClause, RetryPolicy, coerce, connect_with_retry, like_match, parse_check_clause,
};
pub use checkmate_types::{
    BENIGN_ERROR_CODES, CandidateValue, ColumnType, ER_CHECK_CONSTRAINT_VIOLATED,
    ER_PARSE_ERROR, ExecutionOutcome, FailureKind, Predicate, SqlFunction, SqlOperator, Verdict,
};
