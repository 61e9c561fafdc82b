//! The constraint catalog: fetch, parse, clean, and pre-evaluate every
//! CHECK constraint on a target column.
//!
//! A catalog is built once per schema generation, immediately after the
//! fuzzed table is created, and discarded when the table is dropped. It is
//! immutable after construction; schema changes rebuild it wholesale, never
//! patch it.
//!
//! Operand finalization order matters and mirrors the engine's rendering:
//!
//! 1. strip the `_utf8mb4'…'` character-set wrapper and escape characters;
//! 2. rewrite the boolean aliases `true`/`false` to `1`/`0`;
//! 3. only then pre-evaluate transforms on the live engine, so
//!    `EXP(TRUE)` is evaluated as `SELECT exp(1)`.
//!
//! A failed pre-evaluation poisons the predicate (operand sentinel); every
//! later verdict for it is a type error.

use checkmate_error::CheckmateError;
use checkmate_types::{CandidateValue, ColumnType, Predicate, Verdict};
use tracing::{debug, warn};

use crate::backend::{ConstraintRow, EngineSession};
use crate::eval::Evaluator;
use crate::parse::parse_check_clause;

/// An immutable set of predicates for one table/column, valid for the
/// lifetime of the originating schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstraintCatalog {
    table: String,
    column: String,
    predicates: Vec<Predicate>,
}

impl ConstraintCatalog {
    /// Build the catalog for `column` of `table`.
    ///
    /// Consumes `session`: the metadata fetch and scalar pre-evaluations
    /// are the only engine round-trips the oracle ever makes, and the
    /// session is dropped before this returns. Callers needing live
    /// execution use their own connection.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the metadata query fails. Pre-evaluation
    /// failures are not errors; they poison the affected predicate
    /// instead.
    pub fn fetch<S: EngineSession>(
        mut session: S,
        table: &str,
        column: &str,
    ) -> Result<Self, CheckmateError> {
        let rows = session.fetch_check_constraints(table, column)?;
        debug!(table, column, constraints = rows.len(), "fetched check constraints");
        let predicates = rows
            .into_iter()
            .map(|row| build_predicate(&mut session, row))
            .collect();
        Ok(Self {
            table: table.to_owned(),
            column: column.to_owned(),
            predicates,
        })
    }

    /// Target table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Target column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Predicates in discovery order.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Predict whether `value` would satisfy each CHECK constraint on
    /// `column`: one verdict per predicate, in catalog order. Total:
    /// failures degrade into `TypeError` verdicts, never panics or errors.
    #[must_use]
    pub fn evaluate_value_against_constraints(
        &self,
        column: &str,
        value: &CandidateValue,
    ) -> Vec<Verdict> {
        Evaluator::new(self).evaluate(column, value)
    }
}

fn build_predicate<S: EngineSession>(session: &mut S, row: ConstraintRow) -> Predicate {
    let declared_type = ColumnType::from_data_type(&row.data_type);
    if declared_type.is_none() {
        warn!(
            constraint = %row.constraint_name,
            data_type = %row.data_type,
            "unmodeled column type, predicate is dead"
        );
    }

    let Some(parsed) = parse_check_clause(&row.check_clause) else {
        warn!(
            constraint = %row.constraint_name,
            clause = %row.check_clause,
            "unparseable check clause, predicate is dead"
        );
        return Predicate {
            constraint_name: row.constraint_name,
            column: row.column_name,
            check_clause: row.check_clause,
            operator: None,
            transform: None,
            operand_literal: String::new(),
            operand_value: None,
            declared_type,
        };
    };

    if parsed.column != row.column_name {
        debug!(
            constraint = %row.constraint_name,
            clause_column = %parsed.column,
            catalog_column = %row.column_name,
            "clause column does not match catalog column"
        );
    }

    let cleaned = rewrite_boolean_alias(clean_operand(&parsed.operand_literal));
    let operand_value = match parsed.transform {
        Some(func) => {
            let expression = format!("{func}({cleaned})");
            match session.eval_scalar(func, &cleaned) {
                Ok(Some(value)) => Some(value),
                Ok(None) => {
                    warn!(
                        constraint = %row.constraint_name,
                        expression = %expression,
                        "scalar pre-evaluation returned nothing"
                    );
                    None
                }
                Err(err) => {
                    warn!(
                        constraint = %row.constraint_name,
                        expression = %expression,
                        error = %err,
                        "scalar pre-evaluation failed"
                    );
                    None
                }
            }
        }
        None => Some(cleaned),
    };

    Predicate {
        constraint_name: row.constraint_name,
        column: row.column_name,
        check_clause: row.check_clause,
        operator: Some(parsed.operator),
        transform: parsed.transform,
        operand_literal: parsed.operand_literal,
        operand_value,
        declared_type,
    }
}

/// Strip the `_utf8mb4'…'` wrapper (keeping the quoted payload), trim, and
/// drop backslash escapes.
fn clean_operand(raw: &str) -> String {
    let s = raw.trim();
    let s = if s.starts_with("_utf8mb4") {
        s.split('\'').nth(1).unwrap_or(s)
    } else {
        s
    };
    s.trim().replace('\\', "")
}

/// The engine compares `TRUE`/`FALSE` operands as `1`/`0`.
fn rewrite_boolean_alias(operand: String) -> String {
    if operand.eq_ignore_ascii_case("true") {
        "1".to_owned()
    } else if operand.eq_ignore_ascii_case("false") {
        "0".to_owned()
    } else {
        operand
    }
}
