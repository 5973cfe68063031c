//! Terminal rendering of the wizard
//!
//! Reads the wizard's display state, asks the respondent through dialoguer
//! prompts, and turns the answers back into wizard messages.

use crate::survey::message::{LOADING_MESSAGE, RETRY_LABEL};
use crate::ui::prompts::{prompt_confirmation, select_index, text_input};
use crate::ui::spinner::Spinner;
use crate::wizard::{DisplayState, Msg, StepView, SurveyWizard};
use anyhow::Result;
use colored::*;
use log::warn;

const BACK_LABEL: &str = "← Back";
const SUBMIT_LABEL: &str = "Submit";

/// What the respondent asked for on one screen
#[derive(Debug)]
enum Action {
    Dispatch(Vec<Msg>),
    Exit,
}

pub struct TerminalPresenter {
    wizard: SurveyWizard,
}

impl TerminalPresenter {
    pub fn new(mut wizard: SurveyWizard) -> Self {
        let spinner = Spinner::spawn();
        wizard.subscribe(move |display| {
            if matches!(display, DisplayState::Loading) {
                spinner.show(LOADING_MESSAGE);
            } else {
                spinner.hide();
            }
        });

        Self { wizard }
    }

    /// Load the survey and walk the respondent through it
    ///
    /// Returns once the thank-you message is shown, the key is invalid, or the
    /// respondent declines to retry after an error.
    pub async fn run(mut self) -> Result<SurveyWizard> {
        self.wizard.load().await;

        loop {
            let action = render(&self.wizard.display())?;
            match action {
                Action::Dispatch(messages) => {
                    for msg in messages {
                        self.wizard.dispatch(msg).await;
                    }
                }
                Action::Exit => return Ok(self.wizard),
            }
        }
    }
}

fn render(display: &DisplayState<'_>) -> Result<Action> {
    match display {
        DisplayState::InvalidKey | DisplayState::Loading => {
            if matches!(display, DisplayState::Loading) {
                warn!("Presenter saw a loading state after dispatch completed");
            }
            if let Some(message) = display.message() {
                println!("  {}", message.bright_red().bold());
            }
            Ok(Action::Exit)
        }

        DisplayState::Error { .. } | DisplayState::NoConfiguration => {
            if let Some(message) = display.message() {
                println!();
                println!("  {} {}", "❌".red(), message.bright_red());
            }
            if prompt_confirmation(&format!("{}?", RETRY_LABEL), true)? {
                Ok(Action::Dispatch(vec![Msg::Retry]))
            } else {
                Ok(Action::Exit)
            }
        }

        DisplayState::Step(view) => render_step(view),
    }
}

fn render_step(view: &StepView<'_>) -> Result<Action> {
    match view {
        StepView::Question { question, input } => {
            println!();
            println!("  {}", question.bright_white().bold());
            let answer = text_input("Your answer", input)?;
            if answer.trim().is_empty() {
                println!("  {}", "An answer is required to continue".dimmed());
            }
            let messages = vec![Msg::QuestionInput(answer), Msg::Next];
            Ok(Action::Dispatch(messages))
        }

        StepView::Category {
            categories,
            selected,
            can_go_back,
        } => {
            let mut items: Vec<String> = categories.iter().map(|c| c.label.clone()).collect();
            if *can_go_back {
                items.push(BACK_LABEL.to_string());
            }
            let default = selected
                .and_then(|value| categories.iter().position(|c| c.value == value))
                .unwrap_or(0);

            let index = select_index("Pick a category", &items, default)?;
            match categories.get(index) {
                Some(category) => Ok(Action::Dispatch(vec![
                    Msg::SelectCategory(category.value.clone()),
                    Msg::Next,
                ])),
                None => Ok(Action::Dispatch(vec![Msg::Back])),
            }
        }

        StepView::RespondentDetails {
            fields,
            answers,
            can_go_back,
        } => {
            println!();
            println!(
                "  {}",
                "A few details about you (optional)".bright_white().bold()
            );

            let mut messages = Vec::with_capacity(fields.len() + 1);
            for field in fields.iter() {
                let current = answers.get(&field.value).map(String::as_str).unwrap_or("");
                let value = text_input(&field.label, current)?;
                messages.push(Msg::RespondentAnswer {
                    field: field.value.clone(),
                    value,
                });
            }

            let mut items = vec![SUBMIT_LABEL.to_string()];
            if *can_go_back {
                items.push(BACK_LABEL.to_string());
            }
            let next = if select_index("Ready?", &items, 0)? == 0 {
                Msg::Next
            } else {
                Msg::Back
            };
            messages.push(next);
            Ok(Action::Dispatch(messages))
        }

        StepView::ThankYou { message } => {
            println!();
            println!("  {} {}", "✓".bright_green(), message.bright_green().bold());
            Ok(Action::Exit)
        }
    }
}
