//! What the presentation layer should show for a given state
//!
//! `DisplayState` borrows from the wizard state, so computing it is free of
//! side effects and can be repeated as often as a renderer likes.

use crate::api::models::{Category, RespondentDetailField};
use crate::survey::message::{INVALID_KEY_MESSAGE, LOADING_MESSAGE, NO_CONFIGURATION_MESSAGE};
use crate::wizard::state::WizardState;
use crate::wizard::step::WizardStep;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState<'a> {
    /// The key is missing or blank; no retry is offered
    InvalidKey,
    Loading,
    /// A fetch or submit failed; the retry action re-fetches
    Error { message: &'a str },
    /// Nothing loaded yet and no error recorded
    NoConfiguration,
    Step(StepView<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView<'a> {
    Question {
        question: &'a str,
        input: &'a str,
    },
    Category {
        categories: &'a [Category],
        selected: Option<&'a str>,
        can_go_back: bool,
    },
    RespondentDetails {
        fields: &'a [RespondentDetailField],
        answers: &'a HashMap<String, String>,
        can_go_back: bool,
    },
    ThankYou {
        message: &'a str,
    },
}

impl DisplayState<'_> {
    /// Fixed message for the non-step states
    pub fn message(&self) -> Option<&str> {
        match self {
            DisplayState::InvalidKey => Some(INVALID_KEY_MESSAGE),
            DisplayState::Loading => Some(LOADING_MESSAGE),
            DisplayState::Error { message } => Some(*message),
            DisplayState::NoConfiguration => Some(NO_CONFIGURATION_MESSAGE),
            DisplayState::Step(_) => None,
        }
    }

    /// Whether the retry action should be offered
    pub fn offers_retry(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::NoConfiguration)
    }

    pub fn step(&self) -> Option<WizardStep> {
        match self {
            DisplayState::Step(view) => Some(view.step()),
            _ => None,
        }
    }
}

impl StepView<'_> {
    pub fn step(&self) -> WizardStep {
        match self {
            StepView::Question { .. } => WizardStep::Question,
            StepView::Category { .. } => WizardStep::Category,
            StepView::RespondentDetails { .. } => WizardStep::RespondentDetails,
            StepView::ThankYou { .. } => WizardStep::ThankYou,
        }
    }
}

/// Resolve what to show; the first matching rule wins
///
/// 1. invalid key, 2. loading, 3. error, 4. no configuration, 5. current step.
pub fn display_state(key_is_valid: bool, state: &WizardState) -> DisplayState<'_> {
    if !key_is_valid {
        return DisplayState::InvalidKey;
    }
    if state.is_loading() {
        return DisplayState::Loading;
    }
    if let Some(message) = state.error.as_deref() {
        return DisplayState::Error { message };
    }
    let Some(survey) = state.survey.as_ref() else {
        return DisplayState::NoConfiguration;
    };

    let view = match state.current_step {
        WizardStep::Question => StepView::Question {
            question: &survey.config.question,
            input: &state.question_input,
        },
        WizardStep::Category => StepView::Category {
            categories: &survey.config.categories,
            selected: state.selected_category.as_deref(),
            can_go_back: true,
        },
        WizardStep::RespondentDetails => StepView::RespondentDetails {
            fields: &survey.respondent_details,
            answers: &state.respondent_answers,
            can_go_back: true,
        },
        WizardStep::ThankYou => StepView::ThankYou {
            message: &survey.config.thank_you_message,
        },
    };
    DisplayState::Step(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{SurveyConfig, SurveyPayload};

    fn loaded() -> WizardState {
        let mut state = WizardState::default();
        state.apply_survey(SurveyPayload {
            config: SurveyConfig {
                question: "Q".into(),
                categories: vec![],
                thank_you_message: "Thanks".into(),
            },
            respondent_details: vec![],
        });
        state
    }

    #[test]
    fn test_invalid_key_wins_over_everything() {
        let mut state = loaded();
        state.loading = true;
        state.error = Some("boom".into());
        assert_eq!(display_state(false, &state), DisplayState::InvalidKey);
        assert!(!display_state(false, &state).offers_retry());
    }

    #[test]
    fn test_loading_wins_over_error() {
        let mut state = loaded();
        state.loading = true;
        state.error = Some("boom".into());
        assert_eq!(display_state(true, &state), DisplayState::Loading);
    }

    #[test]
    fn test_error_wins_over_step() {
        let mut state = loaded();
        state.error = Some("boom".into());
        let display = display_state(true, &state);
        assert_eq!(display, DisplayState::Error { message: "boom" });
        assert!(display.offers_retry());
        assert_eq!(display.message(), Some("boom"));
    }

    #[test]
    fn test_no_configuration() {
        let state = WizardState::default();
        let display = display_state(true, &state);
        assert_eq!(display, DisplayState::NoConfiguration);
        assert_eq!(display.message(), Some(NO_CONFIGURATION_MESSAGE));
        assert!(display.offers_retry());
    }

    #[test]
    fn test_step_views() {
        let mut state = loaded();
        assert_eq!(
            display_state(true, &state),
            DisplayState::Step(StepView::Question {
                question: "Q",
                input: "",
            })
        );

        state.current_step = WizardStep::ThankYou;
        assert_eq!(
            display_state(true, &state),
            DisplayState::Step(StepView::ThankYou { message: "Thanks" })
        );
        assert_eq!(
            display_state(true, &state).step(),
            Some(WizardStep::ThankYou)
        );
    }

    #[test]
    fn test_display_is_repeatable() {
        let state = loaded();
        assert_eq!(display_state(true, &state), display_state(true, &state));
    }
}
