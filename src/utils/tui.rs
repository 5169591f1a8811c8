use std::time::Duration;

use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Yes/no question defaulting to no.
pub fn confirm(prompt: String) -> anyhow::Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Free text prompt. An empty answer is returned as `None`.
pub fn prompt_optional(prompt: &str, current: Option<&str>) -> anyhow::Result<Option<String>> {
    let mut input = Input::<String>::new()
        .with_prompt(format!("  {}", prompt))
        .allow_empty(true);
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    let answer = input.interact_text()?;
    Ok(if answer.trim().is_empty() { None } else { Some(answer) })
}

pub fn prompt_required(prompt: &str, current: Option<&str>) -> anyhow::Result<String> {
    let mut input = Input::<String>::new().with_prompt(format!("  {}", prompt));
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?)
}
