use crate::api::models::{SubmissionPayload, SurveyConfig, SurveyPayload};
use crate::context::ClientMetadata;
use crate::survey::SurveyKey;
use crate::wizard::step::{StepShape, WizardStep, nearest_reachable};
use std::collections::HashMap;
use std::time::Instant;

/// Mutable wizard state, owned by [`super::SurveyWizard`]
///
/// Only the wizard's update handlers mutate it; everything else reads it
/// through the accessors.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub(crate) current_step: WizardStep,
    pub(crate) question_input: String,
    pub(crate) selected_category: Option<String>,
    pub(crate) respondent_answers: HashMap<String, String>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) submitted: bool,
    pub(crate) survey: Option<SurveyPayload>,
    pub(crate) started_at: Option<Instant>,
}

impl WizardState {
    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn question_input(&self) -> &str {
        &self.question_input
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn respondent_answers(&self) -> &HashMap<String, String> {
        &self.respondent_answers
    }

    pub fn respondent_answer(&self, field_id: &str) -> Option<&str> {
        self.respondent_answers.get(field_id).map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn survey(&self) -> Option<&SurveyPayload> {
        self.survey.as_ref()
    }

    pub fn config(&self) -> Option<&SurveyConfig> {
        self.survey.as_ref().map(|s| &s.config)
    }

    pub fn has_categories_step(&self) -> bool {
        self.config().is_some_and(SurveyConfig::has_categories)
    }

    pub fn has_respondent_details_step(&self) -> bool {
        self.survey
            .as_ref()
            .is_some_and(SurveyPayload::has_respondent_details)
    }

    pub fn shape(&self) -> StepShape {
        StepShape::new(
            self.has_categories_step(),
            self.has_respondent_details_step(),
        )
    }

    /// Trimmed question input is non-empty
    pub fn is_question_answered(&self) -> bool {
        !self.question_input.trim().is_empty()
    }

    /// Validity gate that must hold before leaving `step` forwards
    pub fn step_is_valid(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Question => self.is_question_answered(),
            WizardStep::Category => !self.has_categories_step() || self.selected_category.is_some(),
            // No required fields; any set of answers, including none, is accepted
            WizardStep::RespondentDetails => true,
            WizardStep::ThankYou => true,
        }
    }

    /// Replace the configuration wholesale and keep inputs consistent with it
    ///
    /// The current step falls back to the nearest step the new configuration
    /// still includes; a selection or answers the new configuration no longer
    /// offers are dropped.
    pub(crate) fn apply_survey(&mut self, payload: SurveyPayload) {
        if let Some(selected) = &self.selected_category {
            if payload.config.category(selected).is_none() {
                log::debug!(
                    "Selected category '{}' no longer offered, clearing",
                    selected
                );
                self.selected_category = None;
            }
        }
        self.respondent_answers
            .retain(|field, _| payload.respondent_field(field).is_some());

        self.survey = Some(payload);
        if !self.submitted {
            self.current_step = nearest_reachable(self.current_step, self.shape());
        }
    }

    /// Whole seconds since the question step was first shown
    pub fn completion_seconds(&self, now: Instant) -> Option<u64> {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs())
    }

    /// Assemble the body posted to the response endpoint
    pub fn build_submission(
        &self,
        survey_key: &SurveyKey,
        client: Option<ClientMetadata>,
        now: Instant,
    ) -> SubmissionPayload {
        SubmissionPayload {
            survey_key: survey_key.clone(),
            response: self.question_input.clone(),
            category: self.selected_category.clone(),
            respondent_details: self
                .respondent_answers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            completion_time: client.as_ref().and(self.completion_seconds(now)),
            client,
        }
    }
}
