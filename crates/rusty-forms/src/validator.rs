// File: src/validator.rs
// Purpose: Field-level and submit handlers for the registration form
//
// Every handler mutates FormState and reports what changed as UiEffects by
// diffing the rendered View before and after.

use crate::config::FormConfig;
use crate::field::Field;
use crate::messages;
use crate::render::{render, UiEffect, View};
use crate::state::{blank_requirements, FormModel, FormState, SubmitPhase};
use crate::submission::{Redacted, Submission};
use crate::timer::{SuccessTimer, TimerToken};
use rusty_forms_validation as rules;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Outcome of running every submit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, Option<String>>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Option::is_none)
    }

    /// Message for `field`, `None` when it passed
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).and_then(|m| m.as_deref())
    }

    /// Every field with its optional message, in form order
    pub fn errors(&self) -> &BTreeMap<Field, Option<String>> {
        &self.errors
    }

    /// Fields that failed, in form order
    pub fn invalid_fields(&self) -> Vec<Field> {
        self.errors
            .iter()
            .filter(|(_, message)| message.is_some())
            .map(|(field, _)| *field)
            .collect()
    }
}

/// Runs all four submit checks against `model`. No check short-circuits
/// another.
pub fn validate(model: &FormModel, config: &FormConfig) -> ValidationResult {
    let min_name = config.form.name_min_length;

    let name = (rules::trimmed_len(&model.name) < min_name)
        .then(|| messages::name_too_short(min_name));

    let email = (!rules::is_valid_email(model.email.trim()))
        .then(|| messages::EMAIL_INVALID.to_string());

    let password = (!config.password.evaluate(&model.password).all_met())
        .then(|| messages::PASSWORD_REQUIREMENTS_UNMET.to_string());

    let confirm = (!rules::equals(&model.password, &model.confirm_password))
        .then(|| messages::PASSWORDS_DO_NOT_MATCH.to_string());

    ValidationResult {
        errors: BTreeMap::from([
            (Field::Name, name),
            (Field::Email, email),
            (Field::Password, password),
            (Field::ConfirmPassword, confirm),
        ]),
    }
}

/// Owns the form state and handles every form event
#[derive(Debug, Clone)]
pub struct FormValidator {
    config: FormConfig,
    state: FormState,
    timer: SuccessTimer,
    last_submission: Option<Submission>,
}

impl FormValidator {
    pub fn new(config: FormConfig) -> Self {
        let state = FormState::new(&config.password);
        let timer = SuccessTimer::new(config.success_timeout());
        Self {
            config,
            state,
            timer,
            last_submission: None,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    /// Token of the success-hide timer still counting down, if any
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.pending()
    }

    /// Most recent accepted registration
    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// Records the current value of one input. Shows nothing by itself.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.state.model.set(field, value);
    }

    /// Replaces every value at once
    pub fn set_values(&mut self, model: FormModel) {
        self.state.model = model;
    }

    /// Applies `change` to the state and returns what became visible
    fn apply(&mut self, change: impl FnOnce(&mut FormState)) -> Vec<UiEffect> {
        let before = render(&self.state);
        change(&mut self.state);
        View::diff(&before, &render(&self.state))
    }

    /// Email lost focus: flag a malformed address, clear a good one.
    /// An empty field is left alone.
    pub fn on_email_blur(&mut self) -> Vec<UiEffect> {
        let email = self.state.model.email.trim();
        if email.is_empty() {
            return Vec::new();
        }

        let valid = rules::is_valid_email(email);
        debug!(valid, "email blur");
        self.apply(|state| {
            let indicator = state.indicator_mut(Field::Email);
            if valid {
                indicator.clear();
            } else {
                indicator.show(messages::EMAIL_INVALID);
            }
        })
    }

    /// Password keystroke: refresh the requirements display and clear the
    /// error once every requirement holds. Unmet requirements only surface
    /// at submit.
    pub fn on_password_input(&mut self) -> Vec<UiEffect> {
        let policy = &self.config.password;
        let requirements = policy.evaluate(&self.state.model.password);
        let checklist = policy.checklist(&requirements);
        let all_met = requirements.all_met();
        debug!(all_met, unmet = ?requirements.unmet(), "password input");

        self.apply(|state| {
            state.requirements = checklist;
            if all_met {
                state.indicator_mut(Field::Password).clear();
            }
        })
    }

    /// Confirmation keystroke: compare against the current password once
    /// something has been typed
    pub fn on_confirm_password_input(&mut self) -> Vec<UiEffect> {
        let model = &self.state.model;
        if model.confirm_password.is_empty() {
            return Vec::new();
        }

        let matches = rules::equals(&model.password, &model.confirm_password);
        debug!(matches, "confirm password input");
        self.apply(|state| {
            let indicator = state.indicator_mut(Field::ConfirmPassword);
            if matches {
                indicator.clear();
            } else {
                indicator.show(messages::PASSWORDS_DO_NOT_MATCH);
            }
        })
    }

    /// Name keystroke: clear the error once the name is long enough.
    /// Too-short names are only reported at submit.
    pub fn on_name_input(&mut self) -> Vec<UiEffect> {
        if rules::trimmed_len(&self.state.model.name) < self.config.form.name_min_length {
            return Vec::new();
        }
        self.apply(|state| state.indicator_mut(Field::Name).clear())
    }

    /// Form submitted. Always prevents the default action, then either shows
    /// every failing check or accepts the registration.
    pub fn on_submit(&mut self) -> Vec<UiEffect> {
        let mut effects = vec![UiEffect::PreventDefault];

        self.state.phase = SubmitPhase::Validating;
        let result = validate(&self.state.model, &self.config);

        effects.extend(self.apply(|state| {
            state.clear_errors();
            for (field, message) in result.errors() {
                if let Some(message) = message {
                    state.indicator_mut(*field).show(message.clone());
                }
            }
        }));

        if !result.is_valid() {
            self.state.phase = SubmitPhase::Rejected;
            debug!(invalid = ?result.invalid_fields(), "registration rejected");
            return effects;
        }

        let submission = Submission::from_model(&self.state.model);
        info!(
            name = %submission.name,
            email = %submission.email,
            password = Redacted::TEXT,
            "registration accepted"
        );

        let blank = blank_requirements(&self.config.password);
        effects.extend(self.apply(|state| {
            state.success_visible = true;
            state.model.reset();
            state.requirements = blank;
        }));
        effects.push(UiEffect::ResetForm);

        if let Some(retired) = self.timer.cancel() {
            debug!(token = retired.id(), "success timer reset");
            effects.push(UiEffect::CancelSuccessHide { token: retired });
        }
        let token = self.timer.schedule();
        effects.push(UiEffect::ScheduleSuccessHide {
            token,
            delay_ms: self.config.form.success_timeout_ms,
        });

        self.state.phase = SubmitPhase::Accepted;
        self.last_submission = Some(submission);
        effects
    }

    /// The host's countdown for `token` finished. Hides the success message
    /// if `token` is still the live one.
    pub fn timer_elapsed(&mut self, token: TimerToken) -> Vec<UiEffect> {
        if !self.timer.fire(token) {
            warn!(token = token.id(), "ignoring stale success timer");
            return Vec::new();
        }

        self.apply(|state| {
            state.success_visible = false;
            if state.phase == SubmitPhase::Accepted {
                state.phase = SubmitPhase::Idle;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const STRONG: &str = "Password123!";

    fn filled(name: &str, email: &str, password: &str, confirm: &str) -> FormModel {
        FormModel {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn valid_model() -> FormModel {
        filled("Al", "al@example.com", STRONG, STRONG)
    }

    fn shown(effects: &[UiEffect]) -> Vec<(Field, &str)> {
        effects
            .iter()
            .filter_map(|e| match e {
                UiEffect::ShowError { field, message, .. } => Some((*field, message.as_str())),
                _ => None,
            })
            .collect()
    }

    // --- validate -------------------------------------------------------

    #[rstest]
    #[case("", false)]
    #[case("A", false)]
    #[case("  A  ", false)]
    #[case("Al", true)]
    #[case(" Al ", true)]
    #[case("Alexander", true)]
    fn test_name_rule(#[case] name: &str, #[case] ok: bool) {
        let mut model = valid_model();
        model.name = name.to_string();
        let result = validate(&model, &FormConfig::default());
        assert_eq!(result.error(Field::Name).is_none(), ok);
        if !ok {
            assert_eq!(
                result.error(Field::Name),
                Some("Name must be at least 2 characters long")
            );
        }
    }

    #[rstest]
    #[case("a@b.co", true)]
    #[case("  al@example.com  ", true)]
    #[case("a@b", false)]
    #[case("a b@c.com", false)]
    #[case("", false)]
    fn test_email_rule(#[case] email: &str, #[case] ok: bool) {
        let mut model = valid_model();
        model.email = email.to_string();
        let result = validate(&model, &FormConfig::default());
        assert_eq!(result.error(Field::Email).is_none(), ok);
    }

    #[rstest]
    #[case("Sh0rt!")]
    #[case("alllowercase1!")]
    #[case("NoDigitsHere!")]
    #[case("NoSpecial123")]
    fn test_any_unmet_requirement_gives_same_message(#[case] password: &str) {
        let model = filled("Al", "al@example.com", password, password);
        let result = validate(&model, &FormConfig::default());
        assert_eq!(
            result.error(Field::Password),
            Some("Password must meet all requirements above")
        );
        assert_eq!(result.invalid_fields(), vec![Field::Password]);
    }

    #[test]
    fn test_confirmation_is_exact() {
        let model = filled("Al", "al@example.com", STRONG, "Password123! ");
        let result = validate(&model, &FormConfig::default());
        assert_eq!(result.error(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn test_every_check_runs() {
        let model = filled("A", "nope", "weak", "");
        let result = validate(&model, &FormConfig::default());
        assert!(!result.is_valid());
        assert_eq!(result.invalid_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_empty_form_with_matching_empty_passwords() {
        let result = validate(&FormModel::default(), &FormConfig::default());
        // "" == "" so confirmation itself passes
        assert_eq!(
            result.invalid_fields(),
            vec![Field::Name, Field::Email, Field::Password]
        );
    }

    #[test]
    fn test_configured_name_minimum() {
        let mut config = FormConfig::default();
        config.form.name_min_length = 3;
        let result = validate(&valid_model(), &config);
        assert_eq!(
            result.error(Field::Name),
            Some("Name must be at least 3 characters long")
        );
    }

    // --- field-level handlers -------------------------------------------

    #[test]
    fn test_email_blur_shows_then_clears() {
        let mut v = FormValidator::new(FormConfig::default());

        v.set_value(Field::Email, "al@");
        let effects = v.on_email_blur();
        assert_eq!(shown(&effects), vec![(Field::Email, "Please enter a valid email address")]);

        v.set_value(Field::Email, " al@example.com ");
        let effects = v.on_email_blur();
        assert_eq!(
            effects,
            vec![UiEffect::ClearError {
                field: Field::Email,
                element_id: "emailError",
            }]
        );
    }

    #[test]
    fn test_email_blur_ignores_empty() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_value(Field::Email, "bad");
        v.on_email_blur();

        v.set_value(Field::Email, "   ");
        assert!(v.on_email_blur().is_empty());
        // the old message stays
        assert!(v.state().indicator(Field::Email).is_visible());
    }

    #[test]
    fn test_password_input_updates_requirements_without_live_error() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_value(Field::Password, "abc");
        let effects = v.on_password_input();
        assert!(shown(&effects).is_empty());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::UpdateRequirements { requirements }] if requirements.iter().filter(|r| r.met).count() == 1
        ));
    }

    #[test]
    fn test_password_input_clears_error_when_all_met() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_value(Field::Password, "weak");
        v.on_submit();
        assert!(v.state().indicator(Field::Password).is_visible());

        v.set_value(Field::Password, STRONG);
        let effects = v.on_password_input();
        assert!(effects.contains(&UiEffect::ClearError {
            field: Field::Password,
            element_id: "passwordError",
        }));
    }

    #[test]
    fn test_confirm_input() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_value(Field::Password, STRONG);

        v.set_value(Field::ConfirmPassword, "");
        assert!(v.on_confirm_password_input().is_empty());

        v.set_value(Field::ConfirmPassword, "Pass");
        assert_eq!(
            shown(&v.on_confirm_password_input()),
            vec![(Field::ConfirmPassword, "Passwords do not match")]
        );

        // same message again: nothing new to show
        v.set_value(Field::ConfirmPassword, "Passw");
        assert!(v.on_confirm_password_input().is_empty());

        v.set_value(Field::ConfirmPassword, STRONG);
        assert_eq!(
            v.on_confirm_password_input(),
            vec![UiEffect::ClearError {
                field: Field::ConfirmPassword,
                element_id: "confirmPasswordError",
            }]
        );
    }

    #[test]
    fn test_name_input_only_clears() {
        let mut v = FormValidator::new(FormConfig::default());
        v.on_submit();
        assert!(v.state().indicator(Field::Name).is_visible());

        v.set_value(Field::Name, " A ");
        assert!(v.on_name_input().is_empty());
        assert!(v.state().indicator(Field::Name).is_visible());

        v.set_value(Field::Name, "Al");
        assert_eq!(
            v.on_name_input(),
            vec![UiEffect::ClearError {
                field: Field::Name,
                element_id: "nameError",
            }]
        );
        // already clear
        assert!(v.on_name_input().is_empty());
    }

    // --- submit -----------------------------------------------------------

    #[test]
    fn test_rejected_submit() {
        let mut v = FormValidator::new(FormConfig::default());
        let mut model = valid_model();
        model.name = "A".to_string();
        v.set_values(model);

        let effects = v.on_submit();
        assert_eq!(effects[0], UiEffect::PreventDefault);
        assert_eq!(
            shown(&effects),
            vec![(Field::Name, "Name must be at least 2 characters long")]
        );
        assert!(!effects.contains(&UiEffect::ShowSuccess));
        assert_eq!(v.state().phase, SubmitPhase::Rejected);
        assert_eq!(v.state().model.email, "al@example.com");
        assert_eq!(v.pending_timer(), None);
    }

    #[test]
    fn test_submit_clears_errors_that_now_pass() {
        let mut v = FormValidator::new(FormConfig::default());
        v.on_submit();
        assert_eq!(v.state().visible_errors().len(), 3);

        v.set_values(filled("Al", "al@example.com", "weak", "weak"));
        let effects = v.on_submit();
        assert!(effects.contains(&UiEffect::ClearError {
            field: Field::Name,
            element_id: "nameError",
        }));
        assert_eq!(v.state().visible_errors(), vec![Field::Password]);
    }

    #[test]
    fn test_accepted_submit() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_values(valid_model());
        v.on_password_input();

        let effects = v.on_submit();
        assert_eq!(effects.first(), Some(&UiEffect::PreventDefault));
        assert!(effects.contains(&UiEffect::ShowSuccess));
        assert!(effects.contains(&UiEffect::ResetForm));
        assert!(effects.iter().any(|e| matches!(e, UiEffect::UpdateRequirements { .. })));
        assert_eq!(
            effects.last(),
            Some(&UiEffect::ScheduleSuccessHide {
                token: TimerToken::new(1),
                delay_ms: 3000,
            })
        );

        let state = v.state();
        assert_eq!(state.phase, SubmitPhase::Accepted);
        assert_eq!(state.model, FormModel::default());
        assert!(state.requirements.iter().all(|r| !r.met));
        assert_eq!(
            v.last_submission().map(|s| s.email.as_str()),
            Some("al@example.com")
        );
    }

    #[test]
    fn test_timer_hides_success_and_returns_to_idle() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_values(valid_model());
        v.on_submit();
        let token = v.pending_timer().unwrap();

        assert_eq!(v.timer_elapsed(token), vec![UiEffect::HideSuccess]);
        assert_eq!(v.state().phase, SubmitPhase::Idle);
        assert!(v.timer_elapsed(token).is_empty());
    }

    #[test]
    fn test_resubmit_resets_timer() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_values(valid_model());
        v.on_submit();
        let first = v.pending_timer().unwrap();

        v.set_values(valid_model());
        let effects = v.on_submit();
        let second = v.pending_timer().unwrap();
        assert!(effects.contains(&UiEffect::CancelSuccessHide { token: first }));
        // success was already showing
        assert!(!effects.contains(&UiEffect::ShowSuccess));

        assert!(v.timer_elapsed(first).is_empty());
        assert!(v.state().success_visible);
        assert_eq!(v.timer_elapsed(second), vec![UiEffect::HideSuccess]);
    }

    #[test]
    fn test_rejection_leaves_success_timer_running() {
        let mut v = FormValidator::new(FormConfig::default());
        v.set_values(valid_model());
        v.on_submit();
        let token = v.pending_timer().unwrap();

        // the form was reset, so submitting again is rejected
        v.on_submit();
        assert_eq!(v.state().phase, SubmitPhase::Rejected);
        assert!(v.state().success_visible);

        assert_eq!(v.timer_elapsed(token), vec![UiEffect::HideSuccess]);
        assert_eq!(v.state().phase, SubmitPhase::Rejected);
    }
}
