// File: src/binding.rs
// Purpose: Explicit registration of form handlers with the presentation layer
//
// bind() attaches one listener per handler-table entry; Binding::unbind()
// detaches the same listeners in reverse order.

use crate::error::FormError;
use crate::field::Field;
use crate::render::UiEffect;
use crate::state::FormModel;
use crate::timer::TimerToken;
use crate::validator::FormValidator;
use serde::Serialize;
use tracing::{debug, warn};

/// DOM event that triggers a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    Blur,
    Input,
    Submit,
}

impl Trigger {
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Blur => "blur",
            Trigger::Input => "input",
            Trigger::Submit => "submit",
        }
    }
}

/// Element a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    Field(Field),
    Form,
}

impl Target {
    pub const FORM_ID: &'static str = "registrationForm";

    pub fn element_id(self) -> &'static str {
        match self {
            Target::Field(field) => field.id(),
            Target::Form => Self::FORM_ID,
        }
    }
}

/// One (element, event) pair the host listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Listener {
    pub target: Target,
    pub trigger: Trigger,
}

impl Listener {
    pub fn new(target: Target, trigger: Trigger) -> Self {
        Self { target, trigger }
    }
}

pub type Handler = fn(&mut FormValidator) -> Vec<UiEffect>;

/// Which handler runs for which listener
#[derive(Clone, Default)]
pub struct HandlerTable {
    entries: Vec<(Listener, Handler)>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the handler for `target`/`trigger`
    pub fn on(mut self, target: Target, trigger: Trigger, handler: Handler) -> Self {
        let listener = Listener::new(target, trigger);
        match self.entries.iter_mut().find(|(l, _)| *l == listener) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((listener, handler)),
        }
        self
    }

    /// Email on blur, password/confirmation/name on input, form on submit
    pub fn registration() -> Self {
        Self::new()
            .on(Target::Field(Field::Email), Trigger::Blur, FormValidator::on_email_blur)
            .on(Target::Field(Field::Password), Trigger::Input, FormValidator::on_password_input)
            .on(
                Target::Field(Field::ConfirmPassword),
                Trigger::Input,
                FormValidator::on_confirm_password_input,
            )
            .on(Target::Field(Field::Name), Trigger::Input, FormValidator::on_name_input)
            .on(Target::Form, Trigger::Submit, FormValidator::on_submit)
    }

    pub fn listeners(&self) -> impl Iterator<Item = Listener> + '_ {
        self.entries.iter().map(|(listener, _)| *listener)
    }

    fn handler(&self, listener: Listener) -> Option<Handler> {
        self.entries
            .iter()
            .find(|(l, _)| *l == listener)
            .map(|(_, handler)| *handler)
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.listeners()).finish()
    }
}

/// Presentation layer that owns the real elements and their listeners
pub trait EventHost {
    fn attach(&mut self, listener: Listener);
    fn detach(&mut self, listener: Listener);
}

/// An event reported by the host, carrying the values it read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input { field: Field, value: String },
    Blur { field: Field, value: String },
    Submit { values: FormModel },
}

impl UiEvent {
    pub fn input(field: Field, value: impl Into<String>) -> Self {
        UiEvent::Input {
            field,
            value: value.into(),
        }
    }

    pub fn blur(field: Field, value: impl Into<String>) -> Self {
        UiEvent::Blur {
            field,
            value: value.into(),
        }
    }

    pub fn submit(values: FormModel) -> Self {
        UiEvent::Submit { values }
    }

    pub fn listener(&self) -> Listener {
        match self {
            UiEvent::Input { field, .. } => Listener::new(Target::Field(*field), Trigger::Input),
            UiEvent::Blur { field, .. } => Listener::new(Target::Field(*field), Trigger::Blur),
            UiEvent::Submit { .. } => Listener::new(Target::Form, Trigger::Submit),
        }
    }
}

/// A validator whose handlers are registered with a host
#[derive(Debug)]
pub struct Binding {
    validator: FormValidator,
    handlers: HandlerTable,
    attached: Vec<Listener>,
    bound: bool,
}

/// Attaches every listener in `handlers` to `host`
pub fn bind<H: EventHost + ?Sized>(
    host: &mut H,
    validator: FormValidator,
    handlers: HandlerTable,
) -> Binding {
    let attached: Vec<Listener> = handlers.listeners().collect();
    for listener in &attached {
        host.attach(*listener);
    }
    debug!(listeners = attached.len(), "form bound");

    Binding {
        validator,
        handlers,
        attached,
        bound: true,
    }
}

impl Binding {
    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Listeners currently attached, in attach order
    pub fn listeners(&self) -> &[Listener] {
        &self.attached
    }

    /// Records the values the event carries, then runs its handler if one is
    /// registered
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Vec<UiEffect>, FormError> {
        if !self.is_bound() {
            warn!(listener = ?event.listener(), "dispatch on unbound form");
            return Err(FormError::Unbound);
        }

        let listener = event.listener();
        match event {
            UiEvent::Input { field, value } | UiEvent::Blur { field, value } => {
                self.validator.set_value(field, value)
            }
            UiEvent::Submit { values } => self.validator.set_values(values),
        }

        Ok(self
            .handlers
            .handler(listener)
            .map(|handler| handler(&mut self.validator))
            .unwrap_or_default())
    }

    /// Forwards a finished success-hide countdown to the validator
    pub fn timer_elapsed(&mut self, token: TimerToken) -> Vec<UiEffect> {
        self.validator.timer_elapsed(token)
    }

    /// Detaches every listener attached by [`bind`], last first, and returns
    /// them. Calling it again detaches nothing.
    pub fn unbind<H: EventHost + ?Sized>(&mut self, host: &mut H) -> Vec<Listener> {
        self.bound = false;
        let detached: Vec<Listener> = self.attached.drain(..).rev().collect();
        for listener in &detached {
            host.detach(*listener);
        }
        debug!(listeners = detached.len(), "form unbound");
        detached
    }

    pub fn into_validator(self) -> FormValidator {
        self.validator
    }
}
