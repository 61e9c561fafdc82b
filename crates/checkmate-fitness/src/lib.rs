//! Fitness scoring for the external evolutionary search loop.
//!
//! The scorer turns one generated statement's execution outcome, the
//! oracle's verdict, and the candidate's distance to the constraint
//! boundary into a single scalar. Lower fitness steers the search toward
//! values likely to expose a constraint-enforcement disagreement.
//!
//! Oracle-vs-engine disagreements are recorded on the way through, in a
//! caller-owned [`DefectLedger`] reset on generation-cycle boundaries.

pub mod distance;
pub mod ledger;
pub mod score;

pub use distance::{levenshtein, proximity};
pub use ledger::{DEFAULT_DEFECT_CAP, Defect, DefectKind, DefectLedger};
pub use score::{FitnessScorer, FitnessWeights, extract_literal};
