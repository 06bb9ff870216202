//! Messages shown in the error indicators

pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIREMENTS_UNMET: &str = "Password must meet all requirements above";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Shown when the trimmed name is shorter than `min` characters
pub fn name_too_short(min: usize) -> String {
    format!("Name must be at least {} characters long", min)
}
