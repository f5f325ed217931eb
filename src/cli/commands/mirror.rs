//! Mirror command implementation.
//!
//! `filmixo mirror list|clear|stats` inspects the local mirror without
//! touching the remote.

use async_trait::async_trait;
use chrono::Utc;

use crate::cli::args::MirrorAction;
use crate::error::Result;
use crate::feed::sort_by_recency;
use crate::mirror::MirrorStore;
use crate::ui::{Prompt, UserInterface};

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

pub struct MirrorCommand {
    context: AppContext,
    action: MirrorAction,
}

impl MirrorCommand {
    pub fn new(context: AppContext, action: MirrorAction) -> Self {
        Self { context, action }
    }

    async fn list(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut posts = self.context.mirror().list_all().await?;
        if posts.is_empty() {
            ui.message("Mirror is empty. Run `filmixo sync` to populate it.");
            return Ok(CommandResult::success());
        }

        sort_by_recency(&mut posts);
        ui.show_header(&format!("Mirror ({} posts)", posts.len()));
        display::show_post_list(ui, &posts, Utc::now());
        Ok(CommandResult::success())
    }

    async fn clear(&self, ui: &mut dyn UserInterface, force: bool) -> Result<CommandResult> {
        let mirror = self.context.mirror();
        let count = mirror.list_keys().await?.len();
        if count == 0 && mirror.total_size().await? == 0 {
            ui.message("Mirror is already empty.");
            return Ok(CommandResult::success());
        }

        if !force {
            let prompt = Prompt::confirm(
                "clear_mirror",
                &format!("Delete {} mirrored posts?", count),
                false,
            );
            if !ui.prompt(&prompt)?.as_bool().unwrap_or(false) {
                ui.status("Mirror left untouched.");
                return Ok(CommandResult::success());
            }
        }

        let removed = mirror.clear().await?;
        ui.success(&format!("Removed {} mirrored posts", removed));
        Ok(CommandResult::success())
    }

    async fn stats(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mirror = self.context.mirror();
        let count = mirror.list_keys().await?.len();
        let bytes = mirror.total_size().await?;
        let liked = self.context.ledger()?.len();

        ui.message(&format!("Location: {}", mirror.root().display()));
        ui.message(&format!("Posts:    {}", count));
        ui.message(&format!("Size:     {:.1} KB", bytes as f64 / 1024.0));
        ui.message(&format!("Liked:    {}", liked));
        Ok(CommandResult::success())
    }
}

#[async_trait(?Send)]
impl Command for MirrorCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            MirrorAction::List => self.list(ui).await,
            MirrorAction::Clear { force } => self.clear(ui, *force).await,
            MirrorAction::Stats => self.stats(ui).await,
        }
    }
}
