//! The local mirror of remote posts.
//!
//! The mirror is an on-device keyed store holding a cached copy of every
//! active post. It is written only by the sync engine and read by the feed.
//! Every operation commits on its own; there is no cross-entry transaction.

pub mod disk;
pub mod memory;

pub use disk::DiskMirror;
pub use memory::MemoryMirror;

use async_trait::async_trait;

use crate::content::Post;
use crate::error::Result;

/// Keyed storage for mirror entries.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Read one entry.
    async fn get(&self, id: &str) -> Result<Option<Post>>;

    /// Insert or overwrite an entry, keyed by `post.id`.
    async fn put(&self, post: &Post) -> Result<()>;

    /// Delete the given ids, returning how many existed.
    async fn delete_many(&self, ids: &[String]) -> Result<usize>;

    /// Every stored id.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Every stored entry, in no particular order.
    async fn list_all(&self) -> Result<Vec<Post>>;

    /// Remove everything, returning how many entries were removed.
    async fn clear(&self) -> Result<usize> {
        let keys = self.list_keys().await?;
        self.delete_many(&keys).await
    }

    /// Remove leftovers that no id reaches, returning how many went.
    ///
    /// `list_keys` cannot see an entry it cannot read, so pruning alone
    /// never removes one. Stores without such leftovers keep the default.
    async fn sweep(&self) -> Result<usize> {
        Ok(0)
    }
}
