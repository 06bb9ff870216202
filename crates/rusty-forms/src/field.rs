// File: src/field.rs
// Purpose: The four registration fields and the element ids they map to

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-editable input tracked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Element id of the input
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Element id of the field's error indicator
    pub fn error_id(self) -> &'static str {
        match self {
            Field::Name => "nameError",
            Field::Email => "emailError",
            Field::Password => "passwordError",
            Field::ConfirmPassword => "confirmPasswordError",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}
