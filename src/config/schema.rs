//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::category::DEFAULT_PAGE_SIZE;
use crate::feed::FeedSettings;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmixoConfig {
    /// Where the hosted document store lives.
    pub remote: RemoteConfig,

    /// Homepage feed sizes.
    pub feed: FeedSettings,

    /// Category browsing.
    pub category: CategoryConfig,

    /// Local mirror location.
    pub mirror: MirrorConfig,
}

/// Remote source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the document API. Required by commands that talk to it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Posts per category page.
    pub page_size: usize,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Mirror directory; relative paths resolve against the project root.
    pub dir: PathBuf,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".filmixo").join("mirror"),
        }
    }
}

impl MirrorConfig {
    /// The mirror directory for a project.
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            project_root.join(&self.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FilmixoConfig::default();

        assert_eq!(config.remote.base_url, None);
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.feed.initial_load, 6);
        assert_eq!(config.feed.batch_size, 12);
        assert_eq!(config.feed.pause_after_batches, 2);
        assert_eq!(config.category.page_size, 12);
        assert_eq!(config.mirror.dir, PathBuf::from(".filmixo/mirror"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: FilmixoConfig = serde_yaml::from_str(
            r#"
remote:
  base_url: https://api.example.com
feed:
  batch_size: 4
"#,
        )
        .unwrap();

        assert_eq!(config.remote.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.feed.batch_size, 4);
        assert_eq!(config.feed.initial_load, 6);
    }

    #[test]
    fn mirror_dir_resolution() {
        let root = Path::new("/project");
        assert_eq!(
            MirrorConfig::default().resolve(root),
            PathBuf::from("/project/.filmixo/mirror")
        );

        let absolute = MirrorConfig {
            dir: PathBuf::from("/var/cache/filmixo"),
        };
        assert_eq!(absolute.resolve(root), PathBuf::from("/var/cache/filmixo"));
    }
}
