//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filmixo - terminal client for the Filmixo review feed.
#[derive(Debug, Parser)]
#[command(name = "filmixo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .filmixo/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sync the mirror and page through the homepage feed (default)
    Feed(FeedArgs),

    /// Reconcile the local mirror with the remote manifest
    Sync(SyncArgs),

    /// Show the newest posts in a category
    Category(CategoryArgs),

    /// Show a single post and count a view
    Post(PostArgs),

    /// Like a post (once per device)
    Like(LikeArgs),

    /// Show the site-wide post count
    Stats,

    /// Inspect or clear the local mirror
    Mirror(MirrorArgs),
}

/// Arguments for the `feed` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FeedArgs {
    /// Further pages to load after the initial one
    #[arg(short, long, default_value_t = 2)]
    pub batches: usize,

    /// Keep loading past a pause without asking
    #[arg(long)]
    pub auto_resume: bool,

    /// Print pages as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for FeedArgs {
    fn default() -> Self {
        Self {
            batches: 2,
            auto_resume: false,
            json: false,
        }
    }
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SyncArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `category` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CategoryArgs {
    /// Category slug (action, comedy, drama, thriller, horror, romance, all)
    pub slug: String,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `post` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PostArgs {
    /// Post id or page address (e.g. /post/abc or post.html?id=abc)
    pub reference: String,
}

/// Arguments for the `like` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LikeArgs {
    /// Post id or page address
    pub id: String,
}

/// Arguments for the `mirror` command.
#[derive(Debug, Clone, clap::Args)]
pub struct MirrorArgs {
    #[command(subcommand)]
    pub action: MirrorAction,
}

/// Mirror subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum MirrorAction {
    /// List mirrored posts, newest first
    List,

    /// Delete every mirrored post
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show mirror size and location
    Stats,
}
