//! Terminal user interface.
//!
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, CI, and scripted use
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use filmixo::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("All Posts");
//! ui.message("Nothing here yet");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::{is_ci, OutputMode};
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, FilmixoTheme};

use crate::error::Result;

/// Trait for user interface interactions.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Primary output; shown in every mode.
    fn message(&mut self, msg: &str);

    /// Progress or context line; hidden in quiet mode.
    fn status(&mut self, msg: &str);

    /// Per-item detail; verbose mode only.
    fn detail(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Errors are shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a dim follow-up hint.
    fn show_hint(&mut self, hint: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);

    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without leaving a line behind.
    fn finish_clear(&mut self);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Key used to look up scripted answers.
    pub key: String,
    /// The question to display.
    pub question: String,
    pub prompt_type: PromptType,
    /// Default value if the user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question.
    pub fn confirm(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }

    /// The default as a boolean (`true`, `y`, `yes`); true when unset.
    pub fn default_bool(&self) -> bool {
        self.default
            .as_deref()
            .map(|s| matches!(s.to_lowercase().as_str(), "true" | "y" | "yes"))
            .unwrap_or(true)
    }
}

/// The type of prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    Bool(bool),
    String(String),
}

impl PromptResult {
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Interpret the answer as yes/no.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) => match s.to_lowercase().as_str() {
                "true" | "y" | "yes" => Some(true),
                "false" | "n" | "no" => Some(false),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_carries_default() {
        let prompt = Prompt::confirm("load_more", "Load more posts?", false);

        assert_eq!(prompt.prompt_type, PromptType::Confirm);
        assert!(!prompt.default_bool());
    }

    #[test]
    fn missing_default_is_yes() {
        let prompt = Prompt {
            key: "k".into(),
            question: "q".into(),
            prompt_type: PromptType::Confirm,
            default: None,
        };
        assert!(prompt.default_bool());
    }

    #[test]
    fn prompt_result_as_bool() {
        assert_eq!(PromptResult::Bool(true).as_bool(), Some(true));
        assert_eq!(PromptResult::String("No".into()).as_bool(), Some(false));
        assert_eq!(PromptResult::String("maybe".into()).as_bool(), None);
    }

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(false).as_string(), "false");
        assert_eq!(PromptResult::String("hi".into()).as_string(), "hi");
    }
}
