use anyhow::Result;
use dialoguer::{Input, Select};

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

/// Free-text prompt that accepts an empty answer
///
/// # Arguments
/// * `prompt` - The prompt message to display
/// * `initial` - Text pre-filled for editing
pub fn text_input(prompt: &str, initial: &str) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;

    Ok(input)
}

/// Single choice from `items`, returning the selected index
pub fn select_index(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()?;

    Ok(selection)
}
