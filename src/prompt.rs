use anyhow::{Context, Result};
use dialoguer::theme::{ColorfulTheme, SimpleTheme};
use dialoguer::{Confirm, Input};
use std::io::{self, IsTerminal};

/// Interactive yes/no and free-text questions with stated defaults.
///
/// Prompting is suppressed (the default answer is used) when `--no-input`
/// was given or stdin is not a terminal.
pub struct Prompter {
    assume_defaults: bool,
    no_color: bool,
}

impl Prompter {
    pub fn new(no_input: bool, no_color: bool) -> Self {
        Self {
            assume_defaults: no_input || !io::stdin().is_terminal(),
            no_color,
        }
    }

    pub fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        if self.assume_defaults {
            return Ok(default);
        }
        let answer = if self.no_color {
            Confirm::with_theme(&SimpleTheme)
                .with_prompt(question)
                .default(default)
                .interact()
        } else {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(default)
                .interact()
        };
        answer.with_context(|| format!("failed to read answer for: {question}"))
    }

    pub fn input(&self, question: &str, default: &str) -> Result<String> {
        if self.assume_defaults {
            return Ok(default.to_string());
        }
        let answer = if self.no_color {
            Input::<String>::with_theme(&SimpleTheme)
                .with_prompt(question)
                .default(default.to_string())
                .interact_text()
        } else {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(default.to_string())
                .interact_text()
        };
        answer.with_context(|| format!("failed to read answer for: {question}"))
    }
}
