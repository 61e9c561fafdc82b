//! Normalized predicates and per-evaluation verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sql::{ColumnType, SqlFunction, SqlOperator};

/// One CHECK constraint, normalized from its stored clause text.
///
/// Built once when constraints are fetched for a freshly created table,
/// immutable after pre-evaluation, and discarded with its catalog when the
/// schema is regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Constraint name as recorded in the metadata store.
    pub constraint_name: String,
    /// Column the constraint applies to (from the metadata row).
    pub column: String,
    /// Raw clause text as stored by the engine.
    pub check_clause: String,
    /// Comparison operator. `None` marks a dead predicate (unparseable
    /// clause); dead predicates can never be satisfied.
    pub operator: Option<SqlOperator>,
    /// Scalar transform applied to the operand, if any.
    pub transform: Option<SqlFunction>,
    /// Raw source text of the right-hand operand, before cleaning.
    pub operand_literal: String,
    /// Concrete operand after cleaning and (for transforms) live
    /// pre-evaluation. `None` is the pre-evaluation failure sentinel: every
    /// verdict for such a predicate is a type error.
    pub operand_value: Option<String>,
    /// Declared column type. `None` when the metadata type is one the
    /// oracle does not model, which also makes the predicate dead.
    pub declared_type: Option<ColumnType>,
}

impl Predicate {
    /// True when the operand transform is a character-length/case function,
    /// which forces numeric comparison for numeric-looking varchar pairs.
    #[must_use]
    pub fn char_only(&self) -> bool {
        self.transform.is_some_and(SqlFunction::is_char_only)
    }

    /// A dead predicate carries no usable operator or column type and can
    /// never produce a true verdict.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.operator.is_none() || self.declared_type.is_none()
    }
}

/// Why a verdict came back false without a real comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The candidate/operand pair could not be brought into one comparable
    /// domain (or the predicate itself is unusable).
    TypeError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError => f.write_str("Type error"),
        }
    }
}

/// Outcome of checking one candidate against one predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the candidate satisfies the predicate.
    pub satisfied: bool,
    /// The originating constraint's name.
    pub constraint_name: String,
    /// Present when the verdict is a degraded failure, not a comparison.
    pub failure: Option<FailureKind>,
}

impl Verdict {
    /// A real comparison result.
    #[must_use]
    pub fn new(satisfied: bool, constraint_name: &str) -> Self {
        Self {
            satisfied,
            constraint_name: constraint_name.to_owned(),
            failure: None,
        }
    }

    /// A degraded `(false, name, TypeError)` verdict.
    #[must_use]
    pub fn type_error(constraint_name: &str) -> Self {
        Self {
            satisfied: false,
            constraint_name: constraint_name.to_owned(),
            failure: Some(FailureKind::TypeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(operator: Option<SqlOperator>, declared_type: Option<ColumnType>) -> Predicate {
        Predicate {
            constraint_name: "v1".to_owned(),
            column: "c1".to_owned(),
            check_clause: "(`c1` = 5)".to_owned(),
            operator,
            transform: None,
            operand_literal: "5".to_owned(),
            operand_value: Some("5".to_owned()),
            declared_type,
        }
    }

    #[test]
    fn dead_predicates() {
        assert!(!predicate(Some(SqlOperator::Eq), Some(ColumnType::Int)).is_dead());
        assert!(predicate(None, Some(ColumnType::Int)).is_dead());
        assert!(predicate(Some(SqlOperator::Eq), None).is_dead());
    }

    #[test]
    fn char_only_follows_transform() {
        let mut p = predicate(Some(SqlOperator::Eq), Some(ColumnType::Varchar));
        assert!(!p.char_only());
        p.transform = Some(SqlFunction::CharLength);
        assert!(p.char_only());
        p.transform = Some(SqlFunction::Exp);
        assert!(!p.char_only());
    }

    #[test]
    fn type_error_verdict_shape() {
        let v = Verdict::type_error("v1");
        assert!(!v.satisfied);
        assert_eq!(v.constraint_name, "v1");
        assert_eq!(v.failure, Some(FailureKind::TypeError));
        assert_eq!(FailureKind::TypeError.to_string(), "Type error");
    }

    #[test]
    fn verdict_serde_round_trip() {
        let v = Verdict::new(true, "v1");
        let json = serde_json::to_string(&v).expect("serialize");
        let back: Verdict = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }
}
