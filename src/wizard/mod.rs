//! Survey wizard core
//!
//! `QUESTION -> CATEGORY -> RESPONDENT_DETAILS -> THANK_YOU`, with the two
//! middle steps present only when the loaded configuration asks for them.

pub mod app;
pub mod command;
pub mod display;
pub mod state;
pub mod step;

pub use app::{Msg, Observer, SurveyWizard};
pub use command::Command;
pub use display::{DisplayState, StepView, display_state};
pub use state::WizardState;
pub use step::{StepShape, Transition, WizardStep, next_transition, previous_step};
