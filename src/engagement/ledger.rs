//! On-device record of liked posts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FilmixoError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default = "LedgerFile::current_version")]
    version: u32,
    #[serde(default)]
    liked: BTreeSet<String>,
}

impl LedgerFile {
    fn current_version() -> u32 {
        LikeLedger::CURRENT_VERSION
    }
}

/// Set of post ids this device has liked, optionally backed by a YAML file.
#[derive(Debug, Clone, Default)]
pub struct LikeLedger {
    path: Option<PathBuf>,
    file: LedgerFile,
}

impl LikeLedger {
    /// Current file format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// A ledger that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            file: LedgerFile {
                version: Self::CURRENT_VERSION,
                liked: BTreeSet::new(),
            },
        }
    }

    /// Load a ledger from disk; a missing file is an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let file = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| FilmixoError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            LedgerFile {
                version: Self::CURRENT_VERSION,
                liked: BTreeSet::new(),
            }
        };

        Ok(Self {
            path: Some(path),
            file,
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.file.liked.contains(id)
    }

    pub fn len(&self) -> usize {
        self.file.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.liked.is_empty()
    }

    /// Liked ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.file.liked.iter().map(String::as_str)
    }

    /// Add an id and persist. The id stays unrecorded if the write fails.
    pub fn record(&mut self, id: &str) -> Result<()> {
        if !self.file.liked.insert(id.to_string()) {
            return Ok(());
        }
        if let Err(e) = self.save() {
            self.file.liked.remove(id);
            return Err(e);
        }
        Ok(())
    }

    /// Write the ledger to its file, if it has one.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_yaml::to_string(&self.file)?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn in_memory_records_without_file() {
        let mut ledger = LikeLedger::in_memory();
        ledger.record("a").unwrap();

        assert!(ledger.contains("a"));
        assert!(ledger.path().is_none());
    }

    #[test]
    fn missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let ledger = LikeLedger::load(temp.path().join("likes.yml")).unwrap();

        assert!(ledger.is_empty());
    }

    #[test]
    fn survives_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("likes.yml");

        let mut ledger = LikeLedger::load(&path).unwrap();
        ledger.record("b").unwrap();
        ledger.record("a").unwrap();

        let reloaded = LikeLedger::load(&path).unwrap();
        assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!temp.path().join("nested").join("likes.yml.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("likes.yml");
        fs::write(&path, "liked: [unterminated").unwrap();

        assert!(matches!(
            LikeLedger::load(&path),
            Err(FilmixoError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn failed_write_leaves_id_unrecorded() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let mut ledger = LikeLedger::load(blocker.join("likes.yml")).unwrap();
        assert!(ledger.record("a").is_err());
        assert!(!ledger.contains("a"));
    }
}
