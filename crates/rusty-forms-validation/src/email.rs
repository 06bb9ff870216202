//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` with no whitespace, a single `@` and at least one `.`
/// after it.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Validates email shape.
///
/// The value is matched as given; callers trim first when the field is
/// whitespace-insensitive.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
