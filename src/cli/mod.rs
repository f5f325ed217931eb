//! Command-line interface for Filmixo.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CategoryArgs, Cli, Commands, FeedArgs, LikeArgs, MirrorAction, MirrorArgs, PostArgs, SyncArgs,
};
pub use commands::{AppContext, Command, CommandDispatcher, CommandResult};
