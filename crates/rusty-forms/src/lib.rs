//! # rusty-forms
//!
//! Client-side validation for a registration form: name length, email shape,
//! password strength and password confirmation, with inline error indicators
//! and a success message that hides itself after a delay.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{bind, Field, FormConfig, FormValidator, HandlerTable, UiEvent};
//! # use rusty_forms::{EventHost, Listener};
//! # struct NoopHost;
//! # impl EventHost for NoopHost {
//! #     fn attach(&mut self, _: Listener) {}
//! #     fn detach(&mut self, _: Listener) {}
//! # }
//! # let mut host = NoopHost;
//!
//! let validator = FormValidator::new(FormConfig::default());
//! let mut form = bind(&mut host, validator, HandlerTable::registration());
//!
//! let effects = form
//!     .dispatch(UiEvent::blur(Field::Email, "not-an-email"))
//!     .unwrap();
//! assert!(!effects.is_empty());
//!
//! form.unbind(&mut host);
//! ```
//!
//! ## Architecture
//!
//! - [`validate`] is pure: form values in, [`ValidationResult`] out.
//! - [`FormValidator`] owns the [`FormState`] and turns events into
//!   [`UiEffect`]s by diffing the [`View`] produced by [`render`] before and
//!   after each handler.
//! - [`bind`] registers the handlers with an [`EventHost`]; [`Binding::unbind`]
//!   detaches exactly what was attached.
//! - [`FormSession`] (feature `runtime`) drives the success-hide timer on tokio.
//!
//! Pure rules live in `rusty-forms-validation`, re-exported as [`validation`].

#![doc(html_root_url = "https://docs.rs/rusty-forms/0.1.0")]

pub mod binding;
pub mod config;
pub mod error;
pub mod field;
pub mod messages;
pub mod render;
#[cfg(feature = "runtime")]
pub mod session;
pub mod state;
pub mod submission;
pub mod timer;
pub mod validator;

pub use rusty_forms_validation as validation;

pub use binding::{bind, Binding, EventHost, Handler, HandlerTable, Listener, Target, Trigger, UiEvent};
pub use config::{FormConfig, FormSettings};
pub use error::FormError;
pub use field::Field;
pub use render::{render, IndicatorView, UiEffect, View};
#[cfg(feature = "runtime")]
pub use session::FormSession;
pub use state::{ErrorIndicator, FormModel, FormState, SubmitPhase};
pub use submission::Submission;
pub use timer::{SuccessTimer, TimerToken};
pub use validator::{validate, FormValidator, ValidationResult};
pub use validation::{PasswordPolicy, PasswordRequirements, Requirement};
