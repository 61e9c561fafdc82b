//! Closed operator, scalar-function, and column-type enums.
//!
//! The engine's CHECK clauses only ever carry tokens from these fixed sets,
//! so dispatch is a closed tagged variant rather than a string-keyed lookup;
//! unknown tokens fail parsing and the owning predicate goes dead.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Relational operator extracted from a CHECK clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlOperator {
    /// `=`
    Eq,
    /// `!=` / `<>` (the engine stores `<>`)
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl SqlOperator {
    /// Every operator, in a stable order.
    pub const ALL: [Self; 8] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
        Self::Like,
        Self::NotLike,
    ];

    /// Canonical rendering, as the engine prints it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "like",
            Self::NotLike => "not like",
        }
    }

    /// Recognize one operator token. Symbols match exactly; the word forms
    /// `LIKE` and `NOT LIKE` match case-insensitively (interior whitespace
    /// in `NOT LIKE` must already be collapsed to one space).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Self::Eq),
            "!=" | "<>" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            _ if token.eq_ignore_ascii_case("like") => Some(Self::Like),
            _ if token.eq_ignore_ascii_case("not like") => Some(Self::NotLike),
            _ => None,
        }
    }

    /// True for the pattern-matching operators.
    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::NotLike)
    }
}

impl fmt::Display for SqlOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scalar functions
// ---------------------------------------------------------------------------

/// Scalar transform the engine may apply to a constraint operand.
///
/// The oracle never evaluates these locally; the set exists so the catalog
/// can recognize a transform and hand it back to the live engine for
/// pre-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SqlFunction {
    Abs,
    Acos,
    Asin,
    Atan,
    Ceiling,
    Cos,
    Degrees,
    Exp,
    Floor,
    Log,
    Radians,
    Round,
    Sign,
    Sin,
    Sqrt,
    Tan,
    Ascii,
    BitLength,
    CharLength,
    Length,
    Lower,
    Upper,
}

impl SqlFunction {
    /// Every supported transform, in a stable order.
    pub const ALL: [Self; 22] = [
        Self::Abs,
        Self::Acos,
        Self::Asin,
        Self::Atan,
        Self::Ceiling,
        Self::Cos,
        Self::Degrees,
        Self::Exp,
        Self::Floor,
        Self::Log,
        Self::Radians,
        Self::Round,
        Self::Sign,
        Self::Sin,
        Self::Sqrt,
        Self::Tan,
        Self::Ascii,
        Self::BitLength,
        Self::CharLength,
        Self::Length,
        Self::Lower,
        Self::Upper,
    ];

    /// Lowercase name, as used in `SELECT name(arg)` pre-evaluation queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Acos => "acos",
            Self::Asin => "asin",
            Self::Atan => "atan",
            Self::Ceiling => "ceiling",
            Self::Cos => "cos",
            Self::Degrees => "degrees",
            Self::Exp => "exp",
            Self::Floor => "floor",
            Self::Log => "log",
            Self::Radians => "radians",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Sin => "sin",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Ascii => "ascii",
            Self::BitLength => "bit_length",
            Self::CharLength => "char_length",
            Self::Length => "length",
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }

    /// Recognize a function name, case-insensitively. `ceil` is accepted as
    /// an alias for `ceiling`, matching the engine's own spelling tolerance.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("ceil") {
            return Some(Self::Ceiling);
        }
        Self::ALL
            .into_iter()
            .find(|f| name.eq_ignore_ascii_case(f.as_str()))
    }

    /// True for the string-length/case transforms. Their output is always a
    /// clean number (or case-folded text), which disables the varchar
    /// operand-prefix truncation rule.
    #[must_use]
    pub const fn is_char_only(self) -> bool {
        matches!(
            self,
            Self::BitLength | Self::CharLength | Self::Length | Self::Lower | Self::Upper
        )
    }
}

impl fmt::Display for SqlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Column types
// ---------------------------------------------------------------------------

/// Declared column data type, as reported by the metadata store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ColumnType {
    Int,
    Float,
    Double,
    Decimal,
    Varchar,
}

impl ColumnType {
    /// Every modeled column type.
    pub const ALL: [Self; 5] = [
        Self::Int,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Varchar,
    ];

    /// Lowercase metadata name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Varchar => "varchar",
        }
    }

    /// Parse the metadata store's `DATA_TYPE` string, case-insensitively.
    /// Unknown types are rejected; the owning predicate goes dead rather
    /// than guessing at coercion rules the oracle does not model.
    #[must_use]
    pub fn from_data_type(data_type: &str) -> Option<Self> {
        let name = data_type.trim();
        Self::ALL
            .into_iter()
            .find(|t| name.eq_ignore_ascii_case(t.as_str()))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
