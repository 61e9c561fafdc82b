//! Per-candidate verdict computation.
//!
//! The evaluator is total: it never panics and never raises. Dead
//! predicates, poisoned operands, and coercion failures all degrade into
//! `(false, name, TypeError)` verdicts so the external search loop can
//! never stall on oracle failure.

use std::cmp::Ordering;

use checkmate_types::{CandidateValue, Predicate, SqlOperator, Verdict};

use crate::catalog::ConstraintCatalog;
use crate::coerce::{CoercionPair, coerce};
use crate::pattern::like_match;

/// Applies a catalog's predicates to candidate values.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalog: &'a ConstraintCatalog,
}

impl<'a> Evaluator<'a> {
    /// Borrow `catalog` for evaluation.
    #[must_use]
    pub const fn new(catalog: &'a ConstraintCatalog) -> Self {
        Self { catalog }
    }

    /// One verdict per predicate on `column`, in catalog order.
    #[must_use]
    pub fn evaluate(&self, column: &str, value: &CandidateValue) -> Vec<Verdict> {
        self.catalog
            .predicates()
            .iter()
            .filter(|p| p.column == column)
            .map(|p| evaluate_predicate(p, value))
            .collect()
    }
}

fn evaluate_predicate(predicate: &Predicate, value: &CandidateValue) -> Verdict {
    let (Some(operator), Some(declared_type)) = (predicate.operator, predicate.declared_type)
    else {
        return Verdict::type_error(&predicate.constraint_name);
    };
    let Some(operand) = predicate.operand_value.as_deref() else {
        return Verdict::type_error(&predicate.constraint_name);
    };
    match coerce(value, operand, declared_type, predicate.char_only()) {
        Ok(pair) => Verdict::new(
            apply_operator(operator, &pair),
            &predicate.constraint_name,
        ),
        Err(_) => Verdict::type_error(&predicate.constraint_name),
    }
}

fn apply_operator(operator: SqlOperator, pair: &CoercionPair) -> bool {
    if operator.is_pattern() {
        let (text, pattern) = pair.rendered();
        let matched = like_match(&text, &pattern);
        return (operator == SqlOperator::Like) == matched;
    }
    // NaN on either side compares as nothing: every ordering operator is
    // false, including `<>`.
    let Some(ordering) = pair.compare() else {
        return false;
    };
    match operator {
        SqlOperator::Eq => ordering == Ordering::Equal,
        SqlOperator::Ne => ordering != Ordering::Equal,
        SqlOperator::Gt => ordering == Ordering::Greater,
        SqlOperator::Ge => ordering != Ordering::Less,
        SqlOperator::Lt => ordering == Ordering::Less,
        SqlOperator::Le => ordering != Ordering::Greater,
        // Handled above.
        SqlOperator::Like | SqlOperator::NotLike => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkmate_types::{ColumnType, FailureKind, SqlFunction};

    fn catalog_with(predicates: Vec<Predicate>) -> ConstraintCatalog {
        // Round-trip through serde keeps the constructor private without a
        // test-only backdoor in the catalog itself.
        let json = serde_json::json!({
            "table": "t1",
            "column": "c1",
            "predicates": predicates,
        });
        serde_json::from_value(json).expect("catalog shape")
    }

    fn predicate(
        operator: SqlOperator,
        operand: &str,
        declared_type: ColumnType,
    ) -> Predicate {
        Predicate {
            constraint_name: "v1".to_owned(),
            column: "c1".to_owned(),
            check_clause: String::new(),
            operator: Some(operator),
            transform: None,
            operand_literal: operand.to_owned(),
            operand_value: Some(operand.to_owned()),
            declared_type: Some(declared_type),
        }
    }

    fn verdicts(p: Predicate, value: &CandidateValue) -> Vec<Verdict> {
        catalog_with(vec![p]).evaluate_value_against_constraints("c1", value)
    }

    // --- Numeric columns ---

    #[test]
    fn int_equality() {
        let p = || predicate(SqlOperator::Eq, "5", ColumnType::Int);
        assert_eq!(verdicts(p(), &5.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &6.into()), vec![Verdict::new(false, "v1")]);
        assert_eq!(verdicts(p(), &"5".into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &5.0.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(
            verdicts(p(), &5.15346.into()),
            vec![Verdict::new(false, "v1")]
        );
        assert_eq!(verdicts(p(), &"5a".into()), vec![Verdict::type_error("v1")]);
    }

    #[test]
    fn negative_int_ordering() {
        let p = || predicate(SqlOperator::Gt, "-5", ColumnType::Int);
        assert_eq!(verdicts(p(), &(-4).into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &(-5).into()), vec![Verdict::new(false, "v1")]);
        assert_eq!(
            verdicts(p(), &"-4.9".into()),
            vec![Verdict::new(true, "v1")]
        );
    }

    #[test]
    fn boolean_aliasing_against_numeric_operand() {
        // CHECK (c1 = TRUE) on an int column: catalog stores operand "1".
        let p = || predicate(SqlOperator::Eq, "1", ColumnType::Int);
        assert_eq!(verdicts(p(), &true.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &1.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(
            verdicts(p(), &false.into()),
            vec![Verdict::new(false, "v1")]
        );
        // The word, as a string, is never a boolean.
        assert_eq!(
            verdicts(p(), &"TRUE".into()),
            vec![Verdict::type_error("v1")]
        );
    }

    #[test]
    fn float_column_ordering() {
        let p = || predicate(SqlOperator::Ge, "5.5", ColumnType::Float);
        assert_eq!(verdicts(p(), &5.5.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &"5.6".into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &5.into()), vec![Verdict::new(false, "v1")]);
        assert_eq!(
            verdicts(p(), &"abcd".into()),
            vec![Verdict::type_error("v1")]
        );
    }

    // --- Dead and poisoned predicates ---

    #[test]
    fn poisoned_operand_always_type_errors() {
        let mut p = predicate(SqlOperator::Eq, "5", ColumnType::Int);
        p.operand_value = None;
        let verdicts = verdicts(p, &5.into());
        assert_eq!(verdicts, vec![Verdict::type_error("v1")]);
        assert_eq!(verdicts[0].failure, Some(FailureKind::TypeError));
    }

    #[test]
    fn dead_predicate_always_type_errors() {
        let mut p = predicate(SqlOperator::Eq, "5", ColumnType::Int);
        p.operator = None;
        assert_eq!(verdicts(p, &5.into()), vec![Verdict::type_error("v1")]);
    }

    // --- LIKE ---

    #[test]
    fn like_on_varchar() {
        let p = || predicate(SqlOperator::Like, "test%", ColumnType::Varchar);
        assert_eq!(verdicts(p(), &"test".into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(
            verdicts(p(), &"testing".into()),
            vec![Verdict::new(true, "v1")]
        );
        assert_eq!(
            verdicts(p(), &"Test".into()),
            vec![Verdict::new(false, "v1")]
        );
    }

    #[test]
    fn not_like_negates() {
        let p = || predicate(SqlOperator::NotLike, "test%", ColumnType::Varchar);
        assert_eq!(
            verdicts(p(), &"test".into()),
            vec![Verdict::new(false, "v1")]
        );
        assert_eq!(
            verdicts(p(), &"other".into()),
            vec![Verdict::new(true, "v1")]
        );
    }

    #[test]
    fn like_on_int_column_coerces_first() {
        // LIKE on a numeric column still demands numeric coercion; the
        // pattern then matches the stringified pair.
        let p = || predicate(SqlOperator::Like, "5", ColumnType::Int);
        assert_eq!(verdicts(p(), &"5".into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &5.into()), vec![Verdict::new(true, "v1")]);
        assert_eq!(verdicts(p(), &"55".into()), vec![Verdict::new(false, "v1")]);
        assert_eq!(
            verdicts(p(), &"abcd".into()),
            vec![Verdict::type_error("v1")]
        );
    }

    // --- Varchar ---

    #[test]
    fn varchar_prefix_operand_ordering() {
        // Operand '-5', candidate "-6abc": candidate is not numeric, so the
        // comparison is plain string order, where "-6abc" > "-5".
        let p = || predicate(SqlOperator::Gt, "-5", ColumnType::Varchar);
        assert_eq!(
            verdicts(p(), &"-6abc".into()),
            vec![Verdict::new(true, "v1")]
        );
        // Plain string ordering for non-numeric pairs.
        let p = || predicate(SqlOperator::Gt, "abcd", ColumnType::Varchar);
        assert_eq!(
            verdicts(p(), &"abcde".into()),
            vec![Verdict::new(true, "v1")]
        );
    }

    // --- Catalog-order invariant ---

    #[test]
    fn one_verdict_per_predicate_in_order() {
        let mut first = predicate(SqlOperator::Gt, "1", ColumnType::Int);
        first.constraint_name = "v1".to_owned();
        let mut second = predicate(SqlOperator::Lt, "9", ColumnType::Int);
        second.constraint_name = "v2".to_owned();
        let mut third = predicate(SqlOperator::Ne, "5", ColumnType::Int);
        third.constraint_name = "v3".to_owned();

        let catalog = catalog_with(vec![first, second, third]);
        let verdicts = catalog.evaluate_value_against_constraints("c1", &5.into());
        assert_eq!(
            verdicts,
            vec![
                Verdict::new(true, "v1"),
                Verdict::new(true, "v2"),
                Verdict::new(false, "v3"),
            ]
        );
        // Other columns have no predicates here.
        assert!(
            catalog
                .evaluate_value_against_constraints("c2", &5.into())
                .is_empty()
        );
    }

    // --- Scalar-function predicates ---

    #[test]
    fn pre_evaluated_transform_operand_matches_exactly() {
        // CHECK (c1 = EXP(10)): the operand is whatever the engine computed.
        let engine_exp_10 = (10.0f64).exp().to_string();
        let mut p = predicate(SqlOperator::Eq, &engine_exp_10, ColumnType::Int);
        p.transform = Some(SqlFunction::Exp);
        p.operand_literal = "10".to_owned();

        let exact = CandidateValue::Float((10.0f64).exp());
        assert_eq!(
            verdicts(p.clone(), &exact),
            vec![Verdict::new(true, "v1")]
        );
        assert_eq!(verdicts(p.clone(), &10.into()), vec![Verdict::new(false, "v1")]);
        assert_eq!(
            verdicts(p, &"EXP(10)".into()),
            vec![Verdict::type_error("v1")]
        );
    }

    #[test]
    fn char_length_transform_forces_numeric_comparison() {
        // CHECK (char_length-style operand) on varchar: both sides numeric.
        let mut p = predicate(SqlOperator::Eq, "4", ColumnType::Varchar);
        p.transform = Some(SqlFunction::CharLength);
        assert_eq!(verdicts(p, &"4".into()), vec![Verdict::new(true, "v1")]);
    }
}
