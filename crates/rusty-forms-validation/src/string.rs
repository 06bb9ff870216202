//! String validation functions

/// Number of characters left after trimming surrounding whitespace.
pub fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Exact, case-sensitive equality. No trimming.
pub fn equals(value: &str, expected: &str) -> bool {
    value == expected
}
