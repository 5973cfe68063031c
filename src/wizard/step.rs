//! Wizard steps and the transition table
//!
//! Transitions are a pure function of the current step and the shape of the
//! loaded configuration, so they can be checked without any state or I/O.

use serde::{Deserialize, Serialize};

/// The four ordered stages of the response flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Question,
    Category,
    RespondentDetails,
    ThankYou,
}

impl WizardStep {
    /// Human-readable label for the step
    pub fn label(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::Category => "Category",
            Self::RespondentDetails => "Respondent details",
            Self::ThankYou => "Thank you",
        }
    }
}

/// Which optional steps the loaded configuration enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepShape {
    pub has_categories: bool,
    pub has_respondent_details: bool,
}

impl StepShape {
    pub const fn new(has_categories: bool, has_respondent_details: bool) -> Self {
        Self {
            has_categories,
            has_respondent_details,
        }
    }

    /// Whether `step` can be entered under this configuration
    pub fn includes(self, step: WizardStep) -> bool {
        match step {
            WizardStep::Question | WizardStep::ThankYou => true,
            WizardStep::Category => self.has_categories,
            WizardStep::RespondentDetails => self.has_respondent_details,
        }
    }
}

/// Outcome of a "proceed" intent once the step's gate has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to another step without talking to the network
    Advance(WizardStep),
    /// Every remaining step is done; post the response
    Submit,
    /// No forward transition exists
    Stay,
}

/// Forward transition for `step`
pub fn next_transition(step: WizardStep, shape: StepShape) -> Transition {
    match (step, shape.has_categories, shape.has_respondent_details) {
        (WizardStep::Question, false, false) => Transition::Submit,
        (WizardStep::Question, false, true) => Transition::Advance(WizardStep::RespondentDetails),
        (WizardStep::Question, true, _) => Transition::Advance(WizardStep::Category),
        (WizardStep::Category, _, false) => Transition::Submit,
        (WizardStep::Category, _, true) => Transition::Advance(WizardStep::RespondentDetails),
        (WizardStep::RespondentDetails, _, _) => Transition::Submit,
        (WizardStep::ThankYou, _, _) => Transition::Stay,
    }
}

/// Backward transition for `step`, if any
pub fn previous_step(step: WizardStep, shape: StepShape) -> Option<WizardStep> {
    match step {
        WizardStep::Category => Some(WizardStep::Question),
        WizardStep::RespondentDetails if shape.has_categories => Some(WizardStep::Category),
        WizardStep::RespondentDetails => Some(WizardStep::Question),
        WizardStep::Question | WizardStep::ThankYou => None,
    }
}

/// Walk back from `step` until reaching one the shape includes
pub fn nearest_reachable(step: WizardStep, shape: StepShape) -> WizardStep {
    let mut current = step;
    while !shape.includes(current) {
        match previous_step(current, shape) {
            Some(prev) => current = prev,
            None => return WizardStep::Question,
        }
    }
    current
}
