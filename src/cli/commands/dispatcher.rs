//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use async_trait::async_trait;

use crate::cli::args::{Cli, Commands, FeedArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::AppContext;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
/// The UI is not `Send`, so commands run on the caller's task.
#[async_trait(?Send)]
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: AppContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher around a resolved context.
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand the feed runs with default arguments.
    pub async fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context.clone();
        match &cli.command {
            Some(Commands::Feed(args)) => {
                super::feed::FeedCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Some(Commands::Sync(args)) => {
                super::sync::SyncCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Some(Commands::Category(args)) => {
                super::category::CategoryCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Some(Commands::Post(args)) => {
                super::post::PostCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Some(Commands::Like(args)) => {
                super::like::LikeCommand::new(ctx, args.clone())
                    .execute(ui)
                    .await
            }
            Some(Commands::Stats) => super::stats::StatsCommand::new(ctx).execute(ui).await,
            Some(Commands::Mirror(args)) => {
                super::mirror::MirrorCommand::new(ctx, args.action.clone())
                    .execute(ui)
                    .await
            }
            None => {
                super::feed::FeedCommand::new(ctx, FeedArgs::default())
                    .execute(ui)
                    .await
            }
        }
    }
}
