//! Environment variable overrides.
//!
//! Applied after the YAML layers:
//!
//! | Variable               | Setting               |
//! |------------------------|-----------------------|
//! | `FILMIXO_REMOTE_URL`   | `remote.base_url`     |
//! | `FILMIXO_TIMEOUT_SECS` | `remote.timeout_secs` |
//! | `FILMIXO_MIRROR_DIR`   | `mirror.dir`          |

use std::path::PathBuf;

use crate::config::schema::FilmixoConfig;
use crate::error::{FilmixoError, Result};

pub const REMOTE_URL_VAR: &str = "FILMIXO_REMOTE_URL";
pub const TIMEOUT_VAR: &str = "FILMIXO_TIMEOUT_SECS";
pub const MIRROR_DIR_VAR: &str = "FILMIXO_MIRROR_DIR";

/// Apply overrides read through `lookup`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut FilmixoConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(REMOTE_URL_VAR) {
        config.remote.base_url = Some(url.trim().to_string());
    }

    if let Some(raw) = get(TIMEOUT_VAR) {
        config.remote.timeout_secs =
            raw.trim()
                .parse()
                .map_err(|_| FilmixoError::ConfigValidationError {
                    message: format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_VAR, raw),
                })?;
    }

    if let Some(dir) = get(MIRROR_DIR_VAR) {
        config.mirror.dir = PathBuf::from(dir);
    }

    Ok(())
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut FilmixoConfig) -> Result<()> {
    apply_env_overrides(config, |name| std::env::var(name).ok())
}
