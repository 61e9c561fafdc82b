//! The fitness function.
//!
//! Four signals, fixed positive weights: proximity of the mutated value to
//! the constraint boundary, error-code diversity, CHECK-violation
//! triggering, and inverse execution time. Malformed candidates score the
//! sentinel fitness so the search deprioritizes them without crashing.

use checkmate_oracle::ConstraintCatalog;
use checkmate_types::{CandidateValue, ExecutionOutcome, Verdict};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::proximity;
use crate::ledger::{DefectKind, DefectLedger};

/// Weights for the fitness components, plus the sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of the candidate-to-operand distance.
    pub proximity: f64,
    /// Weight of the unexpected-error flag.
    pub error_diversity: f64,
    /// Weight of the CHECK-violation flag.
    pub constraint_trigger: f64,
    /// Weight of the inverse execution time.
    pub execution_time: f64,
    /// Returned whenever extraction or evaluation cannot proceed; large, so
    /// malformed candidates sink to the bottom of the selection order.
    pub default_fitness: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            proximity: 5.0,
            error_diversity: 2.0,
            constraint_trigger: 2.0,
            execution_time: 4.0,
            default_fitness: 10_000.0,
        }
    }
}

/// Scores generated statements against the oracle's predictions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitnessScorer {
    weights: FitnessWeights,
}

impl FitnessScorer {
    /// A scorer with explicit weights.
    #[must_use]
    pub const fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    /// The active weight configuration.
    #[must_use]
    pub const fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Score one generated `statement` given the engine's execution
    /// `outcome`. Lower is better for the search. Oracle/engine
    /// disagreements are recorded in `ledger` on the way through.
    #[must_use]
    pub fn score(
        &self,
        statement: &str,
        outcome: &ExecutionOutcome,
        catalog: &ConstraintCatalog,
        ledger: &mut DefectLedger,
    ) -> f64 {
        let Some(literal) = extract_literal(statement) else {
            debug!(statement, "no mutated literal found, sentinel fitness");
            return self.weights.default_fitness;
        };
        // A syntactically invalid statement says nothing about constraint
        // enforcement.
        if outcome.is_syntax_error() {
            return self.weights.default_fitness;
        }

        let candidate = CandidateValue::from(literal.as_str());
        let verdicts =
            catalog.evaluate_value_against_constraints(catalog.column(), &candidate);
        let Some(first) = verdicts.first() else {
            return self.weights.default_fitness;
        };
        let Some(operand) = catalog
            .predicates()
            .first()
            .and_then(|p| p.operand_value.as_deref())
        else {
            return self.weights.default_fitness;
        };

        classify(first, outcome, statement, ledger);

        let constraint_trigger = f64::from(outcome.is_constraint_violation());
        let error_diversity = f64::from(outcome.is_unexpected_error());
        let distance = proximity(&literal, operand);

        self.weights.proximity * distance
            + self.weights.error_diversity * error_diversity
            + self.weights.constraint_trigger * constraint_trigger
            + self.weights.execution_time / (1.0 + outcome.elapsed.as_secs_f64())
    }
}

/// Compare the oracle's verdict with what the engine actually did and
/// record any disagreement.
fn classify(
    verdict: &Verdict,
    outcome: &ExecutionOutcome,
    statement: &str,
    ledger: &mut DefectLedger,
) {
    if verdict.satisfied && outcome.is_constraint_violation() {
        ledger.record(DefectKind::OracleSaysPass, statement);
    } else if !verdict.satisfied && !outcome.is_constraint_violation() && outcome.rows_affected > 0
    {
        ledger.record(DefectKind::OracleSaysFail, statement);
    }
    if outcome.passed() && outcome.duplicate_accepted == Some(true) {
        ledger.record(DefectKind::UniqueBypassed, statement);
    }
}

/// Extract the mutated literal from a generated statement: the text between
/// the first `((` and the next `))`, with one layer of matching single
/// quotes stripped off the payload.
#[must_use]
pub fn extract_literal(statement: &str) -> Option<String> {
    let start = statement.find("((")? + 2;
    let end = start + statement[start..].find("))")?;
    let inner = &statement[start..end];
    let inner = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(inner);
    Some(inner.to_owned())
}
