//! Non-interactive UI for pipes, CI, and scripted use.

use std::collections::HashMap;

use crate::error::{FilmixoError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "FILMIXO_PROMPT_";

/// Plain-text UI that never blocks on input.
///
/// Prompts are answered from `FILMIXO_PROMPT_<KEY>` variables, then from
/// the prompt default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    answers: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let answers = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();
        Self { mode, answers }
    }

    /// Create with explicit answers, keyed by variable name (for testing).
    pub fn with_answers(mode: OutputMode, answers: HashMap<String, String>) -> Self {
        Self { mode, answers }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn status(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("  {}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self.answers.get(&env_key).or(prompt.default.as_ref());

        match (answer, &prompt.prompt_type) {
            (Some(value), PromptType::Confirm) => Ok(PromptResult::Bool(
                PromptResult::String(value.clone()).as_bool().unwrap_or(false),
            )),
            (Some(value), PromptType::Input) => Ok(PromptResult::String(value.clone())),
            (None, _) => Err(FilmixoError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("{}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n== {} ==\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("{}", hint);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the final line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_clear(&mut self) {}
}
