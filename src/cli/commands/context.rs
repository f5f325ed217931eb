//! Shared wiring for commands: config, mirror, remote, ledger.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{resolve_config, FilmixoConfig, CONFIG_DIR};
use crate::engagement::{Engagement, LikeLedger};
use crate::error::{FilmixoError, Result};
use crate::mirror::DiskMirror;
use crate::remote::{HttpSource, RemoteSource};
use crate::sync::SyncEngine;

/// File under the config dir that records this device's likes.
pub const LIKES_FILE: &str = "likes.yml";

/// Resolved configuration plus the project it applies to.
#[derive(Clone)]
pub struct AppContext {
    project_root: PathBuf,
    config: FilmixoConfig,
    remote: Option<Arc<dyn RemoteSource>>,
}

impl AppContext {
    pub fn new(project_root: &Path, config: FilmixoConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            remote: None,
        }
    }

    /// Resolve config files and environment for a project.
    pub fn load(project_root: &Path, config_override: Option<&Path>) -> Result<Self> {
        let config = resolve_config(project_root, config_override)?;
        Ok(Self::new(project_root, config))
    }

    /// Use this remote instead of building one from `remote.base_url`.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &FilmixoConfig {
        &self.config
    }

    pub fn mirror(&self) -> Arc<DiskMirror> {
        Arc::new(DiskMirror::new(self.config.mirror.resolve(&self.project_root)))
    }

    /// The remote source. Fails when no base URL is configured.
    pub fn remote(&self) -> Result<Arc<dyn RemoteSource>> {
        if let Some(remote) = &self.remote {
            return Ok(Arc::clone(remote));
        }

        let base_url = self.config.remote.base_url.as_deref().ok_or_else(|| {
            FilmixoError::ConfigValidationError {
                message: format!(
                    "remote.base_url is not set; add it to {}/config.yml or set FILMIXO_REMOTE_URL",
                    CONFIG_DIR
                ),
            }
        })?;

        let timeout = Duration::from_secs(self.config.remote.timeout_secs);
        tracing::debug!("Using remote {} (timeout {:?})", base_url, timeout);
        Ok(Arc::new(HttpSource::with_timeout(base_url, timeout)?))
    }

    pub fn sync_engine(&self) -> Result<SyncEngine> {
        Ok(SyncEngine::new(self.mirror(), self.remote()?))
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_DIR).join(LIKES_FILE)
    }

    pub fn ledger(&self) -> Result<LikeLedger> {
        LikeLedger::load(self.ledger_path())
    }

    pub fn engagement(&self) -> Result<Engagement> {
        Ok(Engagement::new(self.remote()?, self.ledger()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockSource;
    use tempfile::TempDir;

    #[test]
    fn remote_requires_base_url() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default());

        let err = ctx.remote().err().unwrap();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn remote_built_from_config() {
        let temp = TempDir::new().unwrap();
        let mut config = FilmixoConfig::default();
        config.remote.base_url = Some("http://localhost:9/api".to_string());

        let ctx = AppContext::new(temp.path(), config);
        assert!(ctx.remote().is_ok());
    }

    #[test]
    fn injected_remote_wins() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default())
            .with_remote(Arc::new(MockSource::new()));

        assert!(ctx.remote().is_ok());
    }

    #[test]
    fn paths_are_project_relative() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default());

        assert_eq!(ctx.mirror().root(), temp.path().join(".filmixo/mirror"));
        assert_eq!(ctx.ledger_path(), temp.path().join(".filmixo/likes.yml"));
    }

    #[test]
    fn load_without_files_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::load(temp.path(), None).unwrap();

        assert_eq!(ctx.config().feed.batch_size, 12);
    }
}
