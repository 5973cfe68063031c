pub mod api;
pub mod config;
pub mod context;
pub mod survey;
pub mod ui;
pub mod wizard;

pub use api::{SurveyApi, SurveyClient, SurveyError};
pub use survey::{SurveyKey, is_valid_key};
pub use wizard::{DisplayState, StepView, SurveyWizard, WizardStep};
