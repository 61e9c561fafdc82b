//! Value coercion: bring a candidate and a constraint operand into one
//! comparable domain under the declared column type's implicit-conversion
//! rules.
//!
//! These rules reproduce the target engine's quirks on purpose: the oracle
//! is only trustworthy as ground truth if it truncates, aliases, and
//! rejects exactly where the engine does:
//!
//! - booleans alias to `1`/`0` before anything else;
//! - a numeric column accepts only a clean numeric literal
//!   (`[+-]?digits(.digits)?`); trailing garbage is "Data truncated", never
//!   a silent zero;
//! - DECIMAL columns route through arbitrary-precision decimals so exact
//!   precision survives (no binary-float rounding);
//! - VARCHAR comparison goes numeric when both sides look numeric, and the
//!   engine truncates an *operand* with a leading numeric run down to that
//!   run when the candidate is numeric. The truncation is asymmetric: a
//!   non-numeric candidate is never truncated, it forces string comparison.
//!   That asymmetry is the engine's observed behavior, kept intentionally.

use std::cmp::Ordering;
use std::fmt;

use checkmate_error::CoercionError;
use checkmate_types::{CandidateValue, ColumnType};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

// ---------------------------------------------------------------------------
// The numeric domain
// ---------------------------------------------------------------------------

/// The comparable numeric domain: integers stay exact, mixed
/// integer/float comparisons go through f64.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// An exact 64-bit integer.
    Int(i64),
    /// A 64-bit IEEE 754 float.
    Real(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Real(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.partial_cmp(other), Some(Ordering::Equal))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric literal recognition
// ---------------------------------------------------------------------------

/// True when `s` is exactly `[+-]?digits(.digits)?`, the engine's idea of
/// a clean numeric literal. No whitespace, no exponent, no bare `.`.
#[must_use]
pub fn is_numeric_literal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    match body.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// The leading `[+-]?digits` run of `s`, if there is one.
#[must_use]
pub fn numeric_prefix(s: &str) -> Option<&str> {
    let sign = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 { None } else { Some(&s[..sign + digits]) }
}

/// Parse a clean numeric literal: integer parsing when no decimal point is
/// present, floating otherwise. Any parse failure is the engine's
/// truncation error, never a silent zero.
pub fn parse_number(s: &str) -> Result<Number, CoercionError> {
    if !is_numeric_literal(s) {
        return Err(CoercionError::Truncated);
    }
    if s.contains('.') {
        s.parse::<f64>()
            .map(Number::Real)
            .map_err(|_| CoercionError::Truncated)
    } else {
        // Integer literals beyond the i64 range still compare, through f64.
        s.parse::<i64>().map(Number::Int).or_else(|_| {
            s.parse::<f64>()
                .map(Number::Real)
                .map_err(|_| CoercionError::Truncated)
        })
    }
}

// ---------------------------------------------------------------------------
// Coercion pairs
// ---------------------------------------------------------------------------

/// A candidate/operand pair brought into one comparable domain.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionPair {
    /// Both sides numeric.
    Numeric(Number, Number),
    /// Both sides arbitrary-precision decimal (DECIMAL columns).
    Decimal(Decimal, Decimal),
    /// Both sides text.
    Text(String, String),
}

impl CoercionPair {
    /// Relational comparison within the pair's domain. `None` only when a
    /// float side is NaN.
    #[must_use]
    pub fn compare(&self) -> Option<Ordering> {
        match self {
            Self::Numeric(a, b) => a.partial_cmp(b),
            Self::Decimal(a, b) => Some(a.cmp(b)),
            Self::Text(a, b) => Some(a.cmp(b)),
        }
    }

    /// Both sides rendered to text, for the pattern operators.
    #[must_use]
    pub fn rendered(&self) -> (String, String) {
        match self {
            Self::Numeric(a, b) => (a.to_string(), b.to_string()),
            Self::Decimal(a, b) => (a.to_string(), b.to_string()),
            Self::Text(a, b) => (a.clone(), b.clone()),
        }
    }
}

/// Convert `candidate` and `operand` into a comparable pair under
/// `declared_type`'s rules.
///
/// `char_only` is true when the owning predicate's transform is a
/// character-length/case function; it disables the varchar operand-prefix
/// truncation rule (the transform's output is always a clean value).
///
/// # Errors
///
/// [`CoercionError::Truncated`] when either side cannot reach the required
/// domain. The evaluator recovers this into a `TypeError` verdict.
pub fn coerce(
    candidate: &CandidateValue,
    operand: &str,
    declared_type: ColumnType,
    char_only: bool,
) -> Result<CoercionPair, CoercionError> {
    // Booleans alias to 1/0 before any other rule.
    let candidate = candidate.clone().normalize_bool();
    match declared_type {
        ColumnType::Int | ColumnType::Float | ColumnType::Double => Ok(CoercionPair::Numeric(
            candidate_number(&candidate)?,
            parse_number(operand)?,
        )),
        ColumnType::Decimal => Ok(CoercionPair::Decimal(
            candidate_decimal(&candidate)?,
            parse_decimal(operand)?,
        )),
        ColumnType::Varchar => coerce_varchar(&candidate, operand, char_only),
    }
}

fn candidate_number(candidate: &CandidateValue) -> Result<Number, CoercionError> {
    match candidate {
        CandidateValue::Int(i) => Ok(Number::Int(*i)),
        CandidateValue::Float(f) => Ok(Number::Real(*f)),
        CandidateValue::Text(s) => parse_number(s),
        // Already normalized away, but total anyway.
        CandidateValue::Bool(b) => Ok(Number::Int(i64::from(*b))),
    }
}

fn candidate_decimal(candidate: &CandidateValue) -> Result<Decimal, CoercionError> {
    match candidate {
        CandidateValue::Int(i) => Ok(Decimal::from(*i)),
        CandidateValue::Float(f) => Decimal::from_f64(*f).ok_or(CoercionError::Truncated),
        CandidateValue::Text(s) => parse_decimal(s),
        CandidateValue::Bool(b) => Ok(Decimal::from(i64::from(*b))),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, CoercionError> {
    if !is_numeric_literal(s) {
        return Err(CoercionError::Truncated);
    }
    s.parse::<Decimal>().map_err(|_| CoercionError::Truncated)
}

/// VARCHAR comparison-mode selection.
///
/// Numeric when both sides look numeric; numeric against the operand's
/// leading run when only the operand carries trailing garbage (and the
/// predicate is not char-only); plain string comparison otherwise. The
/// candidate's own numeric run is never truncated.
fn coerce_varchar(
    candidate: &CandidateValue,
    operand: &str,
    char_only: bool,
) -> Result<CoercionPair, CoercionError> {
    let text = candidate.render();
    if is_numeric_literal(&text) {
        if is_numeric_literal(operand) {
            return Ok(CoercionPair::Numeric(
                parse_number(&text)?,
                parse_number(operand)?,
            ));
        }
        if !char_only {
            if let Some(prefix) = numeric_prefix(operand) {
                return Ok(CoercionPair::Numeric(
                    parse_number(&text)?,
                    parse_number(prefix)?,
                ));
            }
        }
    }
    Ok(CoercionPair::Text(text, operand.to_owned()))
}
