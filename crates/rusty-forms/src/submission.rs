// File: src/submission.rs
// Purpose: The record kept for an accepted registration

use crate::state::FormModel;
use serde::{Serialize, Serializer};
use std::fmt;

/// Stand-in for the password in every rendering of a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redacted;

impl Redacted {
    pub const TEXT: &'static str = "***hidden***";
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::TEXT)
    }
}

impl Serialize for Redacted {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(Self::TEXT)
    }
}

/// An accepted registration. The password itself is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub password: Redacted,
}

impl Submission {
    /// Takes the trimmed name and email from `model`
    pub fn from_model(model: &FormModel) -> Self {
        Self {
            name: model.name.trim().to_string(),
            email: model.email.trim().to_string(),
            password: Redacted,
        }
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ name: {}, email: {}, password: {} }}",
            self.name, self.email, self.password
        )
    }
}
