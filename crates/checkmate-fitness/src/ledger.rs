//! The per-cycle defect ledger.
//!
//! Whenever the oracle's verdict disagrees with the engine's actual
//! accept/reject decision, that is a candidate defect in the engine's
//! constraint enforcement. The ledger records them with a fixed per-cycle
//! cap to bound noise, and is owned by the caller: no ambient globals; the
//! search loop passes it in and resets it on cycle boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default cap on recorded defects per generation cycle.
pub const DEFAULT_DEFECT_CAP: usize = 15;

/// How the oracle and the engine disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Oracle predicted the constraint holds; the engine rejected the row
    /// with a CHECK-constraint violation.
    OracleSaysPass,
    /// Oracle predicted a violation; the engine accepted the row.
    OracleSaysFail,
    /// The engine accepted the same value twice through a UNIQUE column.
    UniqueBypassed,
}

impl DefectKind {
    /// Stable snake_case name for logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OracleSaysPass => "oracle_says_pass",
            Self::OracleSaysFail => "oracle_says_fail",
            Self::UniqueBypassed => "unique_bypassed",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded oracle/engine disagreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// Generation cycle the defect was observed in.
    pub cycle: u64,
    /// Disagreement direction.
    pub kind: DefectKind,
    /// The offending generated statement, verbatim.
    pub statement: String,
}

/// Caller-owned defect counter, reset on generation-cycle boundaries and
/// capped per cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectLedger {
    cycle: u64,
    recorded_this_cycle: usize,
    cap_per_cycle: usize,
    defects: Vec<Defect>,
}

impl Default for DefectLedger {
    fn default() -> Self {
        Self::new(DEFAULT_DEFECT_CAP)
    }
}

impl DefectLedger {
    /// A ledger recording at most `cap_per_cycle` defects per cycle.
    #[must_use]
    pub const fn new(cap_per_cycle: usize) -> Self {
        Self {
            cycle: 0,
            recorded_this_cycle: 0,
            cap_per_cycle,
            defects: Vec::new(),
        }
    }

    /// Enter generation cycle `cycle`. A new cycle id resets the per-cycle
    /// counter; re-entering the current cycle is a no-op.
    pub fn begin_cycle(&mut self, cycle: u64) {
        if self.cycle != cycle {
            self.cycle = cycle;
            self.recorded_this_cycle = 0;
        }
    }

    /// Record a disagreement. Returns whether it was recorded (i.e. the
    /// cycle cap was not yet reached).
    pub fn record(&mut self, kind: DefectKind, statement: &str) -> bool {
        if self.recorded_this_cycle >= self.cap_per_cycle {
            return false;
        }
        self.recorded_this_cycle += 1;
        warn!(
            cycle = self.cycle,
            kind = %kind,
            statement,
            "potential engine defect"
        );
        self.defects.push(Defect {
            cycle: self.cycle,
            kind,
            statement: statement.to_owned(),
        });
        true
    }

    /// Every defect recorded so far, across cycles.
    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Defects recorded in the current cycle.
    #[must_use]
    pub const fn recorded_this_cycle(&self) -> usize {
        self.recorded_this_cycle
    }

    /// Serialize the ledger to JSON for reporting sinks.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_up_to_cap() {
        let mut ledger = DefectLedger::new(2);
        ledger.begin_cycle(1);
        assert!(ledger.record(DefectKind::OracleSaysPass, "INSERT 1"));
        assert!(ledger.record(DefectKind::OracleSaysFail, "INSERT 2"));
        assert!(!ledger.record(DefectKind::OracleSaysPass, "INSERT 3"));
        assert_eq!(ledger.defects().len(), 2);
        assert_eq!(ledger.recorded_this_cycle(), 2);
    }

    #[test]
    fn cycle_boundary_resets_cap() {
        let mut ledger = DefectLedger::new(1);
        ledger.begin_cycle(1);
        assert!(ledger.record(DefectKind::OracleSaysPass, "a"));
        assert!(!ledger.record(DefectKind::OracleSaysPass, "b"));

        ledger.begin_cycle(2);
        assert!(ledger.record(DefectKind::UniqueBypassed, "c"));
        // Recorded defects accumulate across cycles; only the cap resets.
        assert_eq!(ledger.defects().len(), 2);
    }

    #[test]
    fn reentering_same_cycle_keeps_counter() {
        let mut ledger = DefectLedger::new(1);
        ledger.begin_cycle(5);
        assert!(ledger.record(DefectKind::OracleSaysPass, "a"));
        ledger.begin_cycle(5);
        assert!(!ledger.record(DefectKind::OracleSaysPass, "b"));
    }

    #[test]
    fn ledger_serializes() {
        let mut ledger = DefectLedger::default();
        ledger.begin_cycle(1);
        ledger.record(DefectKind::OracleSaysFail, "INSERT INTO t1 (c1) VALUES ((9))");
        let json = ledger.to_json().expect("serialize");
        assert!(json.contains("oracle_says_fail"));
    }
}
