//! CHECK-clause parsing.
//!
//! The engine stores a single-column CHECK clause in a normalized rendering:
//! one outer pair of parentheses, a back-quoted column identifier, the
//! operator, and the operand. Examples of stored clauses:
//!
//! ```text
//! (`c1` = 5)
//! (`c1` = -(5))                 -- unary minus rendered as a sibling token
//! (`c1` like _utf8mb4'test%')
//! (`c1` = exp(-(10)))
//! ```
//!
//! Two grammatical shapes are recognized, tried in order:
//!
//! 1. a signed parenthesized literal `-(lit)`: the sign and the literal
//!    are reassembled into one token `-lit`;
//! 2. the general case: drop the clause's unmatched trailing `)`, then
//!    test the remainder for `name(args)`. A known function name becomes
//!    the transform and `args` (flattened of nested parentheses, stripped
//!    of back-quotes) the operand; anything else is a plain literal.
//!
//! A clause matching neither shape parses to `None`; the catalog records a
//! dead predicate for it, which can never be satisfied.
//!
//! Parsing is a pure function of the clause text: no engine access, no
//! state. Operand cleaning (`_utf8mb4` wrappers, boolean aliases) happens
//! later, in the catalog.

use checkmate_types::{SqlFunction, SqlOperator};

/// The raw pieces of one parsed clause, before operand cleaning.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedClause {
    /// Column identifier, without back-quotes.
    pub column: String,
    /// Comparison operator.
    pub operator: SqlOperator,
    /// Scalar transform wrapped around the operand, if any.
    pub transform: Option<SqlFunction>,
    /// Raw operand text.
    pub operand_literal: String,
}

/// Parse one stored CHECK clause into its normalized pieces.
#[must_use]
pub fn parse_check_clause(clause: &str) -> Option<ParsedClause> {
    let s = clause.trim();

    // Back-quoted column identifier.
    let open = s.find('`')?;
    let rest = &s[open + 1..];
    let close = rest.find('`')?;
    let column = &rest[..close];
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let rest = rest[close + 1..].trim_start();

    // Operator token; whitespace around it is insignificant.
    let (operator, rest) = scan_operator(rest)?;
    let rhs = rest.trim();

    // Shape 1: signed parenthesized literal.
    if let Some(literal) = parse_signed_parenthesized(rhs) {
        return Some(ParsedClause {
            column: column.to_owned(),
            operator,
            transform: None,
            operand_literal: literal,
        });
    }

    // Shape 2: drop the unmatched trailing `)` closing the clause.
    let rhs = rhs.strip_suffix(')').unwrap_or(rhs).trim();
    if let Some((name, args)) = split_function_call(rhs) {
        let transform = SqlFunction::from_name(name)?;
        // Flatten the engine's nested rendering: `exp(-(10))` carries the
        // operand as `-(10)`.
        let operand: String = args.chars().filter(|c| *c != '(' && *c != ')').collect();
        return Some(ParsedClause {
            column: column.to_owned(),
            operator,
            transform: Some(transform),
            operand_literal: operand.trim().trim_matches('`').to_owned(),
        });
    }

    Some(ParsedClause {
        column: column.to_owned(),
        operator,
        transform: None,
        operand_literal: rhs.trim_matches('`').trim().to_owned(),
    })
}

/// Scan the operator token off the front of `s`.
fn scan_operator(s: &str) -> Option<(SqlOperator, &str)> {
    // Two-character symbols first so `>=` does not scan as `>`.
    for symbol in [">=", "<=", "<>", "!=", "=", ">", "<"] {
        if let Some(rest) = s.strip_prefix(symbol) {
            return SqlOperator::from_token(symbol).map(|op| (op, rest));
        }
    }

    let (first, rest) = split_word(s);
    if first.eq_ignore_ascii_case("not") {
        let (second, rest) = split_word(rest.trim_start());
        let token = format!("{first} {second}");
        return SqlOperator::from_token(&token).map(|op| (op, rest));
    }
    SqlOperator::from_token(first).map(|op| (op, rest))
}

fn split_word(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Shape 1: `-? ( literal )` followed by the clause's closing `)`.
///
/// The engine renders a negative literal operand as two sibling tokens, a
/// bare `-` and a parenthesized magnitude; reassemble them into one signed
/// literal.
fn parse_signed_parenthesized(rhs: &str) -> Option<String> {
    let (negative, rest) = match rhs.strip_prefix('-') {
        Some(r) => (true, r.trim_start()),
        None => (false, rhs),
    };
    let rest = rest.strip_prefix('(')?;
    let close = rest.find(')')?;
    let literal = rest[..close].trim();
    if literal.contains('(') {
        return None;
    }
    if rest[close + 1..].trim() != ")" {
        return None;
    }
    let mut out = String::with_capacity(literal.len() + 1);
    if negative {
        out.push('-');
    }
    out.push_str(literal);
    Some(out)
}

/// Test `s` for the `name(args)` shape.
fn split_function_call(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let name = &s[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let args = s[open + 1..].strip_suffix(')')?;
    Some((name, args))
}
