//! Configuration file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::FilmixoConfig;
use crate::error::{FilmixoError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".filmixo";

/// Project config files, in merge order (later overrides earlier).
///
/// 1. Project config (`.filmixo/config.yml`)
/// 2. Local overrides (`.filmixo/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .filmixo/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .filmixo/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// A `.filmixo` directory wins; a `.git` directory is the fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<FilmixoConfig> {
    let value = load_config_value(path)?;
    from_value(merge_configs(&[value]), path)
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<FilmixoConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| FilmixoError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(merge_configs(&[value]), source_path)
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FilmixoError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FilmixoError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| FilmixoError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<FilmixoConfig> {
    serde_yaml::from_value(value).map_err(|e| FilmixoError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project's config files.
///
/// A project without config files gets the defaults.
pub fn load_merged_config(project_root: &Path) -> Result<FilmixoConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config layer {}", path.display());
        configs.push(load_config_value(path)?);
    }

    from_value(
        merge_configs(&configs),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )
}

/// Load config with optional path override.
///
/// With an override only that file is read, without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<FilmixoConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}
