//! In-memory mirror.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use super::MirrorStore;
use crate::content::Post;
use crate::error::Result;

/// Mirror kept in process memory.
///
/// Used for tests and for sessions that should not touch the disk. Counts
/// every mutating call so callers can check that a pass wrote nothing.
#[derive(Debug, Default)]
pub struct MemoryMirror {
    entries: RwLock<BTreeMap<String, Post>>,
    writes: AtomicUsize,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mirror with entries.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let entries = posts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            entries: RwLock::new(entries),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of put/delete calls made so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stored ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MirrorStore for MemoryMirror {
    async fn get(&self, id: &str) -> Result<Option<Post>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(id).cloned())
    }

    async fn put(&self, post: &Post) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> Result<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(ids.iter().filter(|id| entries.remove(*id).is_some()).count())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.ids())
    }

    async fn list_all(&self) -> Result<Vec<Post>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_and_get() {
        let mirror = MemoryMirror::new();
        mirror.put(&Post::new("a", "Alpha")).await.unwrap();

        let post = mirror.get("a").await.unwrap().unwrap();
        assert_eq!(post.title, "Alpha");
        assert!(mirror.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites() {
        let mirror = MemoryMirror::new();
        mirror.put(&Post::new("a", "Old")).await.unwrap();
        mirror.put(&Post::new("a", "New")).await.unwrap();

        assert_eq!(mirror.get("a").await.unwrap().unwrap().title, "New");
        assert_eq!(mirror.ids(), vec!["a"]);
    }

    #[tokio::test]
    async fn delete_many_counts_existing() {
        let mirror = MemoryMirror::with_posts([Post::new("a", "A"), Post::new("b", "B")]);

        let removed = mirror
            .delete_many(&["a".to_string(), "zzz".to_string()])
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(mirror.ids(), vec!["b"]);
    }

    #[tokio::test]
    async fn list_all_and_clear() {
        let mirror = MemoryMirror::with_posts([Post::new("a", "A"), Post::new("b", "B")]);
        assert_eq!(mirror.list_all().await.unwrap().len(), 2);

        assert_eq!(mirror.clear().await.unwrap(), 2);
        assert!(mirror.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_are_counted() {
        let mirror = MemoryMirror::new();
        assert_eq!(mirror.writes(), 0);

        mirror.put(&Post::new("a", "A")).await.unwrap();
        mirror.get("a").await.unwrap();
        mirror.list_all().await.unwrap();

        assert_eq!(mirror.writes(), 1);
    }
}
