// File: src/error.rs
// Purpose: Errors for contract violations and configuration.
// Invalid user input is never an error here; it becomes an indicator message.

/// Errors raised by the form validator
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Form is not bound to a host")]
    Unbound,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
