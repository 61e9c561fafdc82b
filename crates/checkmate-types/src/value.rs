use std::fmt;

/// A dynamically-typed candidate value fed to the oracle.
///
/// Mirrors the literal families the statement generator can place in a DML
/// value position: integers, floats, strings, and the boolean keywords the
/// engine aliases to `1`/`0`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CandidateValue {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit IEEE 754 floating-point literal.
    Float(f64),
    /// A UTF-8 string literal (quotes already stripped).
    Text(String),
    /// A boolean literal (`TRUE`/`FALSE`).
    Bool(bool),
}

impl CandidateValue {
    /// Normalize booleans to their integer alias.
    ///
    /// The engine treats `TRUE`/`FALSE` as `1`/`0` in every comparison
    /// context, so coercion only ever sees booleans in that form. The word
    /// `"TRUE"` as a *string* is not a boolean and stays text.
    #[must_use]
    pub fn normalize_bool(self) -> Self {
        match self {
            Self::Bool(b) => Self::Int(i64::from(b)),
            other => other,
        }
    }

    /// The raw text form used for string comparison and LIKE matching.
    ///
    /// Unlike [`fmt::Display`], text is rendered without quotes.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => i64::from(*b).to_string(),
        }
    }
}

impl fmt::Display for CandidateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<i64> for CandidateValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for CandidateValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for CandidateValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for CandidateValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CandidateValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CandidateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_normalization() {
        assert_eq!(
            CandidateValue::Bool(true).normalize_bool(),
            CandidateValue::Int(1)
        );
        assert_eq!(
            CandidateValue::Bool(false).normalize_bool(),
            CandidateValue::Int(0)
        );
        // Non-booleans pass through untouched.
        assert_eq!(
            CandidateValue::Text("TRUE".to_owned()).normalize_bool(),
            CandidateValue::Text("TRUE".to_owned())
        );
        assert_eq!(
            CandidateValue::Int(7).normalize_bool(),
            CandidateValue::Int(7)
        );
    }

    #[test]
    fn render_is_unquoted() {
        assert_eq!(CandidateValue::Int(-5).render(), "-5");
        assert_eq!(CandidateValue::Float(5.5).render(), "5.5");
        assert_eq!(CandidateValue::Text("abc".to_owned()).render(), "abc");
        assert_eq!(CandidateValue::Bool(true).render(), "1");
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(CandidateValue::Int(42).to_string(), "42");
        assert_eq!(CandidateValue::Text("hi".to_owned()).to_string(), "'hi'");
        assert_eq!(CandidateValue::Bool(false).to_string(), "FALSE");
    }

    #[test]
    fn from_conversions() {
        assert_eq!(CandidateValue::from(42i64), CandidateValue::Int(42));
        assert_eq!(CandidateValue::from(42i32), CandidateValue::Int(42));
        assert_eq!(CandidateValue::from(1.5f64), CandidateValue::Float(1.5));
        assert_eq!(
            CandidateValue::from("x"),
            CandidateValue::Text("x".to_owned())
        );
        assert_eq!(CandidateValue::from(true), CandidateValue::Bool(true));
    }
}
