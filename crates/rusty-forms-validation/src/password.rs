//! Password validation functions
//!
//! A password is judged against a [`PasswordPolicy`], which yields a
//! [`PasswordRequirements`] record: one named boolean per check. The password
//! is acceptable only when every boolean in the record is true.

use serde::{Deserialize, Serialize};

/// Which checks a password has to pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum number of characters (default: 8)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_true")]
    pub require_uppercase: bool,

    #[serde(default = "default_true")]
    pub require_lowercase: bool,

    #[serde(default = "default_true")]
    pub require_digit: bool,

    #[serde(default = "default_true")]
    pub require_special: bool,

    /// Characters that count as special. Any ASCII punctuation when unset.
    #[serde(default)]
    pub special_characters: Option<String>,
}

fn default_min_length() -> usize {
    8
}

fn default_true() -> bool {
    true
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            special_characters: None,
        }
    }
}

/// Result of checking one password against a policy.
///
/// A check the policy does not require is recorded as satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
}

/// One line of the live requirements display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub key: &'static str,
    pub label: String,
    pub met: bool,
}

impl PasswordPolicy {
    fn is_special(&self, c: char) -> bool {
        match &self.special_characters {
            Some(set) => set.contains(c),
            None => c.is_ascii_punctuation(),
        }
    }

    /// Evaluates every check for `password`. Never short-circuits.
    pub fn evaluate(&self, password: &str) -> PasswordRequirements {
        let check = |required: bool, pred: &dyn Fn(char) -> bool| {
            !required || password.chars().any(pred)
        };

        PasswordRequirements {
            min_length: password.chars().count() >= self.min_length,
            uppercase: check(self.require_uppercase, &|c: char| c.is_uppercase()),
            lowercase: check(self.require_lowercase, &|c: char| c.is_lowercase()),
            digit: check(self.require_digit, &|c: char| c.is_numeric()),
            special: check(self.require_special, &|c: char| self.is_special(c)),
        }
    }

    /// Checklist shown next to the password field, in display order.
    ///
    /// Only checks the policy actually requires are listed.
    pub fn checklist(&self, requirements: &PasswordRequirements) -> Vec<Requirement> {
        let special_label = match &self.special_characters {
            Some(set) => format!("One special character ({})", set),
            None => "One special character".to_string(),
        };

        [
            (true, "minLength", format!("At least {} characters", self.min_length), requirements.min_length),
            (self.require_uppercase, "uppercase", "One uppercase letter".to_string(), requirements.uppercase),
            (self.require_lowercase, "lowercase", "One lowercase letter".to_string(), requirements.lowercase),
            (self.require_digit, "digit", "One number".to_string(), requirements.digit),
            (self.require_special, "special", special_label, requirements.special),
        ]
        .into_iter()
        .filter(|(required, ..)| *required)
        .map(|(_, key, label, met)| Requirement { key, label, met })
        .collect()
    }
}

impl PasswordRequirements {
    /// Logical AND over every check in the record
    pub fn all_met(&self) -> bool {
        self.as_array().iter().all(|(_, met)| *met)
    }

    /// Names of the checks that failed, in record order
    pub fn unmet(&self) -> Vec<&'static str> {
        self.as_array()
            .iter()
            .filter(|(_, met)| !met)
            .map(|(key, _)| *key)
            .collect()
    }

    fn as_array(&self) -> [(&'static str, bool); 5] {
        [
            ("minLength", self.min_length),
            ("uppercase", self.uppercase),
            ("lowercase", self.lowercase),
            ("digit", self.digit),
            ("special", self.special),
        ]
    }
}

/// Checks `password` against the default policy
pub fn validate_password(password: &str) -> PasswordRequirements {
    PasswordPolicy::default().evaluate(password)
}
