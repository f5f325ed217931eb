//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command receives an
//! [`AppContext`] carrying the resolved configuration, so:
//! - config is loaded once per invocation
//! - tests can swap in a mock remote
//! - remote-free commands (`mirror`) work without a base URL

pub mod category;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod feed;
pub mod like;
pub mod mirror;
pub mod post;
pub mod stats;
pub mod sync;

pub use context::AppContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
