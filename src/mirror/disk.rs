//! Directory-backed mirror.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::MirrorStore;
use crate::content::Post;
use crate::error::{FilmixoError, Result};

/// Mirror stored as one JSON document per post.
pub struct DiskMirror {
    /// Root directory for entries.
    root: PathBuf,
}

impl DiskMirror {
    /// Create a mirror rooted at a directory. Nothing is created until the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the mirror root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document holding an entry.
    pub fn entry_path(&self, id: &str) -> PathBuf {
        let hash = Sha256::digest(id.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(format!("{}.json", hash_str))
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| FilmixoError::Store {
                key: self.root.display().to_string(),
                message: format!("Failed to create mirror directory: {}", e),
            })
    }

    async fn read_entry(path: &Path) -> Result<Option<Post>> {
        match fs::read_to_string(path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_path(path: &Path) -> Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FilmixoError::Store {
                key: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Total bytes on disk across all mirror files, leftovers included.
    pub async fn total_size(&self) -> Result<u64> {
        let mut total = 0;
        for path in self.mirror_files().await? {
            if let Ok(meta) = fs::metadata(&path).await {
                total += meta.len();
            }
        }
        Ok(total)
    }

    /// Every entry document and interrupted write under the root.
    async fn mirror_files(&self) -> Result<Vec<PathBuf>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if is_entry(&path) || is_partial(&path) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    async fn entry_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = self.mirror_files().await?;
        paths.retain(|p| is_entry(p));
        Ok(paths)
    }
}

fn is_entry(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// A `.json.tmp` left behind by a write that never reached its rename.
fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".json.tmp"))
}

#[async_trait]
impl MirrorStore for DiskMirror {
    async fn get(&self, id: &str) -> Result<Option<Post>> {
        let post = Self::read_entry(&self.entry_path(id)).await?;
        // Guard against a hash collision handing back someone else's entry.
        Ok(post.filter(|p| p.id == id))
    }

    async fn put(&self, post: &Post) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.entry_path(&post.id);
        let json = serde_json::to_string_pretty(post)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| FilmixoError::Store {
                key: post.id.clone(),
                message: e.to_string(),
            })?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| FilmixoError::Store {
                key: post.id.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> Result<usize> {
        let mut removed = 0;
        for id in ids {
            match fs::remove_file(self.entry_path(id)).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(FilmixoError::Store {
                        key: id.clone(),
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(removed)
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.list_all().await?.into_iter().map(|p| p.id).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for path in self.entry_paths().await? {
            match Self::read_entry(&path).await {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping unreadable mirror entry {:?}: {}", path, e),
            }
        }
        Ok(posts)
    }

    /// Removes every mirror file by path, including ones `list_keys` cannot
    /// read. Only entry documents count towards the result.
    async fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for path in self.mirror_files().await? {
            if Self::remove_path(&path).await? && is_entry(&path) {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Removes entry documents that no longer parse and every `.json.tmp`.
    async fn sweep(&self) -> Result<usize> {
        let mut swept = 0;
        for path in self.mirror_files().await? {
            let leftover = is_partial(&path)
                || matches!(Self::read_entry(&path).await, Err(FilmixoError::Json(_)));
            if leftover && Self::remove_path(&path).await? {
                tracing::debug!("Swept mirror leftover {:?}", path);
                swept += 1;
            }
        }
        Ok(swept)
    }
}
