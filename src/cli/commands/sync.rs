//! Sync command implementation.

use async_trait::async_trait;

use crate::cli::args::SyncArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

/// Runs one reconciliation pass and reports it.
pub struct SyncCommand {
    context: AppContext,
    args: SyncArgs,
}

impl SyncCommand {
    pub fn new(context: AppContext, args: SyncArgs) -> Self {
        Self { context, args }
    }
}

#[async_trait(?Send)]
impl Command for SyncCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = self.context.sync_engine()?;

        let mut spinner = ui.start_spinner("Syncing mirror...");
        let report = engine.reconcile().await;
        spinner.finish_clear();

        if self.args.json {
            display::show_json(ui, &report)?;
        } else if report.aborted {
            ui.error(&report.summary());
        } else {
            display::show_sync_report(ui, &report);
        }

        // Any skipped entry is worth a non-zero exit for scripts.
        Ok(if report.aborted {
            CommandResult::failure(1)
        } else if report.is_complete() {
            CommandResult::success()
        } else {
            CommandResult::failure(2)
        })
    }
}
