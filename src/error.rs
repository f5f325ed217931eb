//! Error types for FILMIXO operations.
//!
//! This module defines [`FilmixoError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FilmixoError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `FilmixoError::Other`) for unexpected errors
//! - Reconciliation and pagination swallow their own failures after logging;
//!   only user-facing operations return these errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for FILMIXO operations.
#[derive(Debug, Error)]
pub enum FilmixoError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The remote answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    RemoteStatus { status: u16, url: String },

    /// Transport-level failure talking to the remote source.
    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A mirror store operation failed.
    #[error("Mirror store error for '{key}': {message}")]
    Store { key: String, message: String },

    /// A post could not be found locally or remotely.
    #[error("Unknown post: {id}")]
    UnknownPost { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for FILMIXO operations.
pub type Result<T> = std::result::Result<T, FilmixoError>;
