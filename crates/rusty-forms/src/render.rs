// File: src/render.rs
// Purpose: Pure rendering of FormState and the effects a host applies

use crate::field::Field;
use crate::state::FormState;
use crate::timer::TimerToken;
use rusty_forms_validation::Requirement;
use serde::Serialize;

/// What one error indicator looks like
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorView {
    pub field: Field,
    pub element_id: &'static str,
    pub message: Option<String>,
}

/// Snapshot of everything the form shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub indicators: Vec<IndicatorView>,
    pub requirements: Vec<Requirement>,
    pub success_visible: bool,
}

/// An instruction for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEffect {
    /// Stop the browser's own submit navigation
    PreventDefault,
    #[serde(rename_all = "camelCase")]
    ShowError {
        field: Field,
        element_id: &'static str,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    ClearError {
        field: Field,
        element_id: &'static str,
    },
    UpdateRequirements {
        requirements: Vec<Requirement>,
    },
    ShowSuccess,
    HideSuccess,
    /// Empty every input
    ResetForm,
    #[serde(rename_all = "camelCase")]
    ScheduleSuccessHide {
        token: TimerToken,
        delay_ms: u64,
    },
    CancelSuccessHide {
        token: TimerToken,
    },
}

/// Renders the visible part of `state`
pub fn render(state: &FormState) -> View {
    View {
        indicators: Field::ALL
            .into_iter()
            .map(|field| IndicatorView {
                field,
                element_id: field.error_id(),
                message: state.indicator(field).message().map(str::to_string),
            })
            .collect(),
        requirements: state.requirements.clone(),
        success_visible: state.success_visible,
    }
}

impl View {
    /// Effects that turn `old` into `new` on screen.
    ///
    /// Unchanged parts produce nothing, so applying the same state twice is
    /// a no-op for the host.
    pub fn diff(old: &View, new: &View) -> Vec<UiEffect> {
        let mut effects = Vec::new();

        for (before, after) in old.indicators.iter().zip(&new.indicators) {
            if before.message == after.message {
                continue;
            }
            effects.push(match &after.message {
                Some(message) => UiEffect::ShowError {
                    field: after.field,
                    element_id: after.element_id,
                    message: message.clone(),
                },
                None => UiEffect::ClearError {
                    field: after.field,
                    element_id: after.element_id,
                },
            });
        }

        if old.requirements != new.requirements {
            effects.push(UiEffect::UpdateRequirements {
                requirements: new.requirements.clone(),
            });
        }

        match (old.success_visible, new.success_visible) {
            (false, true) => effects.push(UiEffect::ShowSuccess),
            (true, false) => effects.push(UiEffect::HideSuccess),
            _ => {}
        }

        effects
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.indicators
            .iter()
            .find(|indicator| indicator.field == field)
            .and_then(|indicator| indicator.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rusty_forms_validation::PasswordPolicy;

    fn blank() -> FormState {
        FormState::new(&PasswordPolicy::default())
    }

    #[test]
    fn test_render_lists_every_indicator_in_form_order() {
        let view = render(&blank());
        let ids: Vec<_> = view.indicators.iter().map(|i| i.element_id).collect();
        assert_eq!(
            ids,
            vec!["nameError", "emailError", "passwordError", "confirmPasswordError"]
        );
        assert!(view.indicators.iter().all(|i| i.message.is_none()));
    }

    #[test]
    fn test_identical_views_diff_to_nothing() {
        let view = render(&blank());
        assert!(View::diff(&view, &view).is_empty());
    }

    #[test]
    fn test_diff_shows_and_clears() {
        let mut state = blank();
        state.indicator_mut(Field::Name).show("short");
        let before = render(&state);

        state.indicator_mut(Field::Name).clear();
        state.indicator_mut(Field::Email).show("bad");
        state.success_visible = true;
        let after = render(&state);

        assert_eq!(
            View::diff(&before, &after),
            vec![
                UiEffect::ClearError {
                    field: Field::Name,
                    element_id: "nameError",
                },
                UiEffect::ShowError {
                    field: Field::Email,
                    element_id: "emailError",
                    message: "bad".to_string(),
                },
                UiEffect::ShowSuccess,
            ]
        );
    }

    #[test]
    fn test_diff_emits_requirements_only_on_change() {
        let policy = PasswordPolicy::default();
        let mut state = blank();
        let before = render(&state);

        state.requirements = policy.checklist(&policy.evaluate("abc"));
        let after = render(&state);

        let effects = View::diff(&before, &after);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], UiEffect::UpdateRequirements { .. }));
    }

    #[test]
    fn test_effect_serialization_is_tagged() {
        let effect = UiEffect::ScheduleSuccessHide {
            token: TimerToken::new(7),
            delay_ms: 3000,
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "scheduleSuccessHide", "token": 7, "delayMs": 3000})
        );

        let json = serde_json::to_value(UiEffect::ShowError {
            field: Field::ConfirmPassword,
            element_id: "confirmPasswordError",
            message: "Passwords do not match".to_string(),
        })
        .unwrap();
        assert_eq!(json["field"], "confirmPassword");
        assert_eq!(json["elementId"], "confirmPasswordError");
    }
}
