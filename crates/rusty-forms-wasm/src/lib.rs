//! rusty-forms WASM
//!
//! WebAssembly bindings for the registration validator. The page forwards
//! DOM events to a `RegistrationForm` and applies the effects it returns;
//! success-hide timers run on the JS side with `setTimeout` and are reported
//! back through `timerElapsed`.
//!
//! ```javascript
//! const form = new RegistrationForm();
//! for (const { elementId, event } of form.listeners()) {
//!     document.getElementById(elementId).addEventListener(event, onEvent);
//! }
//! applyEffects(form.input('password', passwordInput.value));
//! ```

use rusty_forms::validation::{self as rules, PasswordPolicy};
use rusty_forms::{
    bind, Binding, EventHost, Field, FormConfig, FormModel, FormValidator, HandlerTable, Listener,
    TimerToken, UiEffect, UiEvent,
};
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Element id and DOM event name for one listener, as JS needs them
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListenerSpec {
    pub element_id: &'static str,
    pub event: &'static str,
}

impl From<Listener> for ListenerSpec {
    fn from(listener: Listener) -> Self {
        Self {
            element_id: listener.target.element_id(),
            event: listener.trigger.event_name(),
        }
    }
}

/// Keeps the listener list JS is expected to mirror
#[derive(Default)]
struct ListenerList(Vec<Listener>);

impl EventHost for ListenerList {
    fn attach(&mut self, listener: Listener) {
        self.0.push(listener);
    }

    fn detach(&mut self, listener: Listener) {
        self.0.retain(|l| *l != listener);
    }
}

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn specs(listeners: &[Listener]) -> Vec<ListenerSpec> {
    listeners.iter().copied().map(ListenerSpec::from).collect()
}

/// A registration form bound to the page
#[wasm_bindgen]
pub struct RegistrationForm {
    binding: Binding,
    host: ListenerList,
}

#[wasm_bindgen]
impl RegistrationForm {
    /// `config` uses the `rusty-forms.toml` shape, snake_case keys included,
    /// e.g. `{ form: { success_timeout_ms: 5000 } }`. `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RegistrationForm, JsValue> {
        let config: FormConfig = if config.is_undefined() || config.is_null() {
            FormConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        config.validate().map_err(to_js)?;

        let mut host = ListenerList::default();
        let binding = bind(&mut host, FormValidator::new(config), HandlerTable::registration());
        Ok(Self { binding, host })
    }

    /// `[{ elementId, event }]` to attach with `addEventListener`
    pub fn listeners(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&specs(&self.host.0))?)
    }

    /// An input event on `field` (`name`, `email`, `password`, `confirmPassword`)
    pub fn input(&mut self, field: &str, value: &str) -> Result<JsValue, JsValue> {
        let field: Field = field.parse().map_err(to_js)?;
        self.dispatch(UiEvent::input(field, value))
    }

    /// A blur event on `field`
    pub fn blur(&mut self, field: &str, value: &str) -> Result<JsValue, JsValue> {
        let field: Field = field.parse().map_err(to_js)?;
        self.dispatch(UiEvent::blur(field, value))
    }

    /// The submit event, with every field's current value:
    /// `{ name, email, password, confirmPassword }`
    pub fn submit(&mut self, values: JsValue) -> Result<JsValue, JsValue> {
        let values: FormModel = serde_wasm_bindgen::from_value(values)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse form values: {}", e)))?;
        self.dispatch(UiEvent::submit(values))
    }

    /// Call when the `setTimeout` for a `scheduleSuccessHide` effect fires
    #[wasm_bindgen(js_name = timerElapsed)]
    pub fn timer_elapsed(&mut self, token: u32) -> Result<JsValue, JsValue> {
        let effects = self.binding.timer_elapsed(TimerToken::new(u64::from(token)));
        Ok(serde_wasm_bindgen::to_value(&effects)?)
    }

    /// Full snapshot of what should be on screen
    pub fn view(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.binding.validator().view())?)
    }

    /// Detaches everything; returns the listeners JS should remove
    pub fn unbind(&mut self) -> Result<JsValue, JsValue> {
        let detached = self.binding.unbind(&mut self.host);
        Ok(serde_wasm_bindgen::to_value(&specs(&detached))?)
    }

    fn dispatch(&mut self, event: UiEvent) -> Result<JsValue, JsValue> {
        let effects: Vec<UiEffect> = self.binding.dispatch(event).map_err(to_js)?;
        Ok(serde_wasm_bindgen::to_value(&effects)?)
    }
}

/// Quick email validation, trimming like the form does
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    rules::is_valid_email(email.trim())
}

/// Requirements checklist for `password` under the default policy
#[wasm_bindgen(js_name = passwordRequirements)]
pub fn password_requirements_js(password: &str) -> Result<JsValue, JsValue> {
    let policy = PasswordPolicy::default();
    let checklist = policy.checklist(&policy.evaluate(password));
    Ok(serde_wasm_bindgen::to_value(&checklist)?)
}
