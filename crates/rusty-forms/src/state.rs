// File: src/state.rs
// Purpose: Everything the validator tracks between events

use crate::field::Field;
use rusty_forms_validation::{PasswordPolicy, Requirement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current value of every field
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormModel {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormModel {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    /// Empties every field, like a form reset
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// Passwords never reach logs through Debug
impl fmt::Debug for FormModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModel")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***hidden***")
            .field("confirm_password", &"***hidden***")
            .finish()
    }
}

/// Shows or hides a validation message next to one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorIndicator {
    message: Option<String>,
}

impl ErrorIndicator {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Hides the message. Clearing a hidden indicator does nothing.
    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Where the last submit left the form
///
/// `Idle -> Validating -> Rejected | Accepted`; `Accepted` goes back to
/// `Idle` once the success indicator hides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Rejected,
    Accepted,
}

/// Form values plus everything visible about them
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub model: FormModel,
    indicators: [ErrorIndicator; 4],
    /// Live requirements display next to the password field
    pub requirements: Vec<Requirement>,
    pub success_visible: bool,
    pub phase: SubmitPhase,
}

impl FormState {
    /// Empty form with the requirements display showing `policy` unmet
    pub fn new(policy: &PasswordPolicy) -> Self {
        Self {
            model: FormModel::default(),
            indicators: Default::default(),
            requirements: blank_requirements(policy),
            success_visible: false,
            phase: SubmitPhase::Idle,
        }
    }

    pub fn indicator(&self, field: Field) -> &ErrorIndicator {
        &self.indicators[field.index()]
    }

    pub fn indicator_mut(&mut self, field: Field) -> &mut ErrorIndicator {
        &mut self.indicators[field.index()]
    }

    pub fn clear_errors(&mut self) {
        self.indicators.iter_mut().for_each(ErrorIndicator::clear);
    }

    /// Fields whose indicator is currently showing a message
    pub fn visible_errors(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.indicator(*field).is_visible())
            .collect()
    }
}

/// Requirements display for an empty password
pub(crate) fn blank_requirements(policy: &PasswordPolicy) -> Vec<Requirement> {
    policy.checklist(&policy.evaluate(""))
}
