use crate::api::SurveyApi;
use crate::api::models::SurveyPayload;
use crate::context::{ClientContextProvider, NoClientContext};
use crate::survey::SurveyKey;
use crate::survey::message::{FETCH_FAILED, SUBMIT_FAILED, format_error_message};
use crate::wizard::command::Command;
use crate::wizard::display::{DisplayState, display_state};
use crate::wizard::state::WizardState;
use crate::wizard::step::{Transition, WizardStep, next_transition, previous_step};
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

/// Called after every state change with what should now be shown
pub type Observer = Box<dyn FnMut(&DisplayState<'_>) + Send>;

#[derive(Debug, Clone)]
pub enum Msg {
    /// Fetch the configuration for the widget's key
    Load,
    SurveyLoaded(Result<SurveyPayload, String>),

    QuestionInput(String),
    SelectCategory(String),
    RespondentAnswer { field: String, value: String },

    /// Proceed intent: validate the current step and advance or submit
    Next,
    Back,
    Submit,
    Submitted(Result<(), String>),

    /// Clear the error and fetch the configuration again
    Retry,
}

/// The survey wizard: state, transitions and the fetch/submit lifecycle
///
/// Follows the update/command loop: `update` mutates state synchronously and
/// returns side effects as a [`Command`], `dispatch` runs those effects and
/// feeds their results back in. Network calls never overlap; while a fetch or
/// submit is in flight, further proceed/back/submit/retry intents are ignored.
pub struct SurveyWizard {
    key: Option<SurveyKey>,
    state: WizardState,
    api: Arc<dyn SurveyApi>,
    context: Arc<dyn ClientContextProvider>,
    observers: Vec<Observer>,
}

impl SurveyWizard {
    /// Create a wizard for a raw key; an unusable key leaves it in the invalid-key state
    pub fn new(key: Option<&str>, api: Arc<dyn SurveyApi>) -> Self {
        let key = SurveyKey::parse(key).ok();
        if key.is_none() {
            warn!("Survey wizard created without a valid survey key");
        }

        Self {
            key,
            state: WizardState::default(),
            api,
            context: Arc::new(NoClientContext),
            observers: Vec::new(),
        }
    }

    /// Enrich submissions with client metadata from `context`
    pub fn with_context(mut self, context: Arc<dyn ClientContextProvider>) -> Self {
        self.context = context;
        self
    }

    /// Register an observer notified after every state change
    pub fn subscribe(&mut self, observer: impl FnMut(&DisplayState<'_>) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// What the presentation layer should show right now
    pub fn display(&self) -> DisplayState<'_> {
        display_state(self.key.is_some(), &self.state)
    }

    pub fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Load => self.start_fetch(),

            Msg::SurveyLoaded(result) => {
                self.state.loading = false;
                match result {
                    Ok(payload) => {
                        info!("Loaded survey configuration: {:?}", payload.config.question);
                        self.state.error = None;
                        self.state.apply_survey(payload);
                        if self.state.started_at.is_none() {
                            self.state.started_at = Some(Instant::now());
                        }
                    }
                    Err(message) => {
                        warn!("Survey fetch failed: {}", message);
                        self.state.error = Some(message);
                    }
                }
                Command::None
            }

            Msg::QuestionInput(text) => {
                self.state.question_input = text;
                Command::None
            }

            Msg::SelectCategory(value) => {
                let offered = self
                    .state
                    .config()
                    .is_some_and(|c| c.category(&value).is_some());
                if offered {
                    self.state.selected_category = Some(value);
                } else {
                    warn!("Ignoring unknown category '{}'", value);
                }
                Command::None
            }

            Msg::RespondentAnswer { field, value } => {
                let known = self
                    .state
                    .survey()
                    .is_some_and(|s| s.respondent_field(&field).is_some());
                if known {
                    self.state.respondent_answers.insert(field, value);
                } else {
                    warn!("Ignoring answer for unknown respondent field '{}'", field);
                }
                Command::None
            }

            Msg::Next => {
                if !self.ready_for_intent("next") {
                    return Command::None;
                }

                let step = self.state.current_step;
                if !self.state.step_is_valid(step) {
                    debug!("{} step not complete, staying", step.label());
                    return Command::None;
                }

                match next_transition(step, self.state.shape()) {
                    Transition::Advance(next) => {
                        debug!("Advancing from {} to {}", step.label(), next.label());
                        self.state.current_step = next;
                        Command::None
                    }
                    Transition::Submit => self.start_submit(),
                    Transition::Stay => Command::None,
                }
            }

            Msg::Back => {
                if !self.ready_for_intent("back") {
                    return Command::None;
                }

                let step = self.state.current_step;
                if let Some(prev) = previous_step(step, self.state.shape()) {
                    debug!("Going back from {} to {}", step.label(), prev.label());
                    self.state.current_step = prev;
                }
                Command::None
            }

            Msg::Submit => self.start_submit(),

            Msg::Submitted(result) => {
                self.state.loading = false;
                match result {
                    Ok(()) => {
                        info!("Survey response submitted");
                        self.state.current_step = WizardStep::ThankYou;
                        self.state.submitted = true;
                    }
                    Err(message) => {
                        warn!("Survey submission failed: {}", message);
                        self.state.error = Some(message);
                    }
                }
                Command::None
            }

            Msg::Retry => {
                if self.state.is_loading() {
                    debug!("Retry ignored, request already in flight");
                    return Command::None;
                }
                self.state.error = None;
                self.start_fetch()
            }
        }
    }

    /// Run `msg` and every message produced by its commands to completion
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);

        while let Some(msg) = pending.pop_front() {
            let command = self.update(msg);
            self.notify();

            if let Command::Perform(future) = command {
                pending.push_back(future.await);
            }
        }
    }

    /// Initial load; does nothing without a valid key
    pub async fn load(&mut self) {
        self.dispatch(Msg::Load).await;
    }

    pub async fn set_question_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::QuestionInput(text.into())).await;
    }

    pub async fn select_category(&mut self, value: impl Into<String>) {
        self.dispatch(Msg::SelectCategory(value.into())).await;
    }

    pub async fn set_respondent_answer(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.dispatch(Msg::RespondentAnswer {
            field: field.into(),
            value: value.into(),
        })
        .await;
    }

    pub async fn next_step(&mut self) {
        self.dispatch(Msg::Next).await;
    }

    pub async fn prev_step(&mut self) {
        self.dispatch(Msg::Back).await;
    }

    pub async fn submit_survey(&mut self) {
        self.dispatch(Msg::Submit).await;
    }

    pub async fn retry_operation(&mut self) {
        self.dispatch(Msg::Retry).await;
    }

    fn notify(&mut self) {
        let display = display_state(self.key.is_some(), &self.state);
        for observer in &mut self.observers {
            observer(&display);
        }
    }

    /// Step intents need a loaded survey and no request in flight
    fn ready_for_intent(&self, intent: &str) -> bool {
        if self.state.is_loading() {
            debug!("Ignoring {} while a request is in flight", intent);
            return false;
        }
        if self.state.survey.is_none() {
            debug!("Ignoring {} before a survey is loaded", intent);
            return false;
        }
        true
    }

    fn start_fetch(&mut self) -> Command<Msg> {
        let Some(key) = self.key.clone() else {
            debug!("No valid survey key, skipping fetch");
            return Command::None;
        };
        if self.state.is_loading() {
            debug!("Fetch ignored, request already in flight");
            return Command::None;
        }

        self.state.loading = true;
        self.state.error = None;

        let api = Arc::clone(&self.api);
        Command::perform(
            async move {
                api.fetch_survey_config(&key)
                    .await
                    .map_err(|e| format_error_message(&e, FETCH_FAILED))
            },
            Msg::SurveyLoaded,
        )
    }

    fn start_submit(&mut self) -> Command<Msg> {
        if !self.ready_for_intent("submit") {
            return Command::None;
        }
        if self.state.submitted {
            debug!("Response already submitted");
            return Command::None;
        }
        if !self.state.is_question_answered() {
            debug!("Refusing to submit without a response");
            return Command::None;
        }
        let Some(key) = self.key.clone() else {
            return Command::None;
        };

        let payload = self
            .state
            .build_submission(&key, self.context.client_metadata(), Instant::now());

        self.state.loading = true;
        self.state.error = None;

        let api = Arc::clone(&self.api);
        Command::perform(
            async move {
                api.submit_response(&payload)
                    .await
                    .map_err(|e| format_error_message(&e, SUBMIT_FAILED))
            },
            Msg::Submitted,
        )
    }
}

impl std::fmt::Debug for SurveyWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyWizard")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
