//! Feed command implementation.
//!
//! The `filmixo feed` command syncs the mirror, prints the first page, then
//! simulates the reader scrolling to the bottom `--batches` times.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::category::ALL_POSTS;
use crate::cli::args::FeedArgs;
use crate::error::Result;
use crate::feed::{FeedPaginator, LoadTrigger, Page, PageOutcome, TriggerState};
use crate::ui::{Prompt, UserInterface};

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

/// The feed command implementation.
pub struct FeedCommand {
    context: AppContext,
    args: FeedArgs,
}

impl FeedCommand {
    pub fn new(context: AppContext, args: FeedArgs) -> Self {
        Self { context, args }
    }

    pub fn args(&self) -> &FeedArgs {
        &self.args
    }

    /// Whether to keep loading after a pause.
    fn should_resume(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.args.auto_resume {
            return Ok(true);
        }
        if self.args.json {
            return Ok(false);
        }
        let interactive = ui.is_interactive();
        let prompt = Prompt::confirm("load_more", "Load more posts?", interactive);
        Ok(ui.prompt(&prompt)?.as_bool().unwrap_or(false))
    }

    fn show_page(&self, ui: &mut dyn UserInterface, page: &Page) {
        if self.args.json {
            return;
        }
        if let Some(report) = &page.sync {
            display::show_sync_report(ui, report);
        }
        if page.initial {
            ui.show_header(ALL_POSTS);
            if page.posts.is_empty() {
                ui.message("No posts yet.");
            }
        }
        display::show_post_list(ui, &page.posts, Utc::now());
        ui.detail(&format!(
            "{} delivered, {} remaining",
            page.delivered, page.remaining
        ));
    }
}

#[async_trait(?Send)]
impl Command for FeedCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let paginator = Arc::new(FeedPaginator::new(
            self.context.sync_engine()?,
            self.context.config().feed,
        ));
        let trigger = LoadTrigger::new(paginator);
        let mut pages = Vec::new();

        let mut spinner = ui.start_spinner("Syncing mirror...");
        match trigger.start().await {
            PageOutcome::Delivered(page) => {
                spinner.finish_clear();
                self.show_page(ui, &page);
                pages.push(page);
            }
            PageOutcome::Failed(e) => {
                spinner.finish_error("Could not read the local mirror");
                return Err(e);
            }
            PageOutcome::Busy => {
                spinner.finish_clear();
                ui.warning("A feed load is already running");
                return Ok(CommandResult::failure(1));
            }
        }

        for _ in 0..self.args.batches {
            match trigger.state() {
                TriggerState::Paused => {
                    if !self.should_resume(ui)? {
                        break;
                    }
                    trigger.resume();
                }
                TriggerState::Exhausted => break,
                TriggerState::Armed | TriggerState::Loading => {}
            }

            match trigger.on_visible().await {
                Some(PageOutcome::Delivered(page)) => {
                    self.show_page(ui, &page);
                    pages.push(page);
                }
                Some(PageOutcome::Failed(e)) => return Err(e),
                Some(PageOutcome::Busy) | None => break,
            }
        }

        if self.args.json {
            display::show_json(ui, &pages)?;
            return Ok(CommandResult::success());
        }

        match trigger.state() {
            TriggerState::Paused => {
                ui.show_hint("Feed paused. Run with --auto-resume to keep loading.")
            }
            TriggerState::Exhausted => ui.status("You're all caught up."),
            TriggerState::Armed | TriggerState::Loading => {}
        }

        Ok(CommandResult::success())
    }
}
