//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::error::{FilmixoError, Result};

use super::{Prompt, PromptResult, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> FilmixoError {
    FilmixoError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user on a terminal.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    match prompt.prompt_type {
        PromptType::Confirm => {
            let answer = Confirm::with_theme(&theme)
                .with_prompt(&prompt.question)
                .default(prompt.default_bool())
                .interact_on(term)
                .map_err(map_dialoguer_err)?;
            Ok(PromptResult::Bool(answer))
        }
        PromptType::Input => {
            let input = Input::<String>::with_theme(&theme).with_prompt(&prompt.question);
            let answer = match &prompt.default {
                Some(default) => input.default(default.clone()).interact_on(term),
                None => input.interact_on(term),
            }
            .map_err(map_dialoguer_err)?;
            Ok(PromptResult::String(answer))
        }
    }
}
