//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Environment overrides in [`env`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use filmixo::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".filmixo");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "feed:\n  batch_size: 4\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.feed.batch_size, 4);
//! ```
//!
//! # Configuration File Locations
//!
//! Layers are merged in this order, later winning:
//! 1. Project config (`.filmixo/config.yml`)
//! 2. Local overrides (`.filmixo/config.local.yml`)
//! 3. `FILMIXO_*` environment variables
//!
//! An explicit `--config` file replaces layers 1 and 2.

pub mod env;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

use std::path::Path;

use crate::error::Result;

pub use env::{apply_env_overrides, apply_process_env};
pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{CategoryConfig, FilmixoConfig, MirrorConfig, RemoteConfig};
pub use validator::{validate, validate_config, ValidationError};

/// Load, apply environment overrides, and validate.
pub fn resolve_config(project_root: &Path, config_override: Option<&Path>) -> Result<FilmixoConfig> {
    let mut config = load_config(project_root, config_override)?;
    apply_process_env(&mut config)?;
    validate(&config)?;
    Ok(config)
}
