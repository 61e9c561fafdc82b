//! SQL `LIKE` pattern matching.
//!
//! `%` matches any run of characters (including the empty run), `_` matches
//! exactly one character, and every other character matches itself. The
//! match is case-sensitive (binary collation) and anchored at both ends.
//! No escape sequence handling: the constraint grammar never produces
//! `ESCAPE` clauses.

/// Match `text` against the SQL LIKE `pattern`.
///
/// Iterative matcher with single-point backtracking: remember the most
/// recent `%` and, on mismatch, retry from one character further into the
/// text. Linear in `text.len() * pattern.len()` worst case.
#[must_use]
pub fn like_match(text: &str, pattern: &str) -> bool {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();

    let mut ti = 0;
    let mut pi = 0;
    // (pattern index of the last `%`, text index it was tried at)
    let mut resume: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '%' {
            resume = Some((pi, ti));
            pi += 1;
        } else if pi < p.len() && (p[pi] == '_' || p[pi] == t[ti]) {
            ti += 1;
            pi += 1;
        } else if let Some((star_pi, star_ti)) = resume {
            // Let the last `%` swallow one more character and retry.
            pi = star_pi + 1;
            ti = star_ti + 1;
            resume = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    // Only trailing `%` may remain unconsumed.
    while pi < p.len() && p[pi] == '%' {
        pi += 1;
    }
    pi == p.len()
}
