//! The reconciliation pass.

use std::sync::Arc;

use super::SyncReport;
use crate::content::{ManifestEntry, Post};
use crate::mirror::MirrorStore;
use crate::remote::RemoteSource;

/// Reconciles a mirror against a remote source.
#[derive(Clone)]
pub struct SyncEngine {
    mirror: Arc<dyn MirrorStore>,
    remote: Arc<dyn RemoteSource>,
}

impl SyncEngine {
    pub fn new(mirror: Arc<dyn MirrorStore>, remote: Arc<dyn RemoteSource>) -> Self {
        Self { mirror, remote }
    }

    /// The mirror this engine writes to.
    pub fn mirror(&self) -> &Arc<dyn MirrorStore> {
        &self.mirror
    }

    /// The remote this engine reads from.
    pub fn remote(&self) -> &Arc<dyn RemoteSource> {
        &self.remote
    }

    /// Run one reconciliation pass.
    ///
    /// Never fails: a manifest failure aborts the pass before the mirror is
    /// touched, and per-entry failures are skipped. Entries are processed
    /// one at a time in manifest order.
    pub async fn reconcile(&self) -> SyncReport {
        let manifest = match self.remote.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("Failed to fetch manifest, keeping mirror as is: {}", e);
                return SyncReport::aborted();
            }
        };

        let mut report = SyncReport {
            manifest_size: manifest.len(),
            ..SyncReport::default()
        };

        report.pruned = self.prune(&manifest.active_ids()).await;
        report.swept = self.sweep().await;

        for entry in &manifest.entries {
            self.refresh(entry, &mut report).await;
        }

        tracing::info!("Mirror reconciled: {}", report.summary());
        report
    }

    async fn prune(&self, active: &std::collections::HashSet<&str>) -> usize {
        let stored = match self.mirror.list_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!("Failed to list mirror entries, skipping prune: {}", e);
                return 0;
            }
        };

        let stale: Vec<String> = stored
            .into_iter()
            .filter(|id| !active.contains(id.as_str()))
            .collect();
        if stale.is_empty() {
            return 0;
        }

        match self.mirror.delete_many(&stale).await {
            Ok(removed) => {
                tracing::debug!("Pruned {} inactive mirror entries", removed);
                removed
            }
            Err(e) => {
                tracing::warn!("Failed to prune {} mirror entries: {}", stale.len(), e);
                0
            }
        }
    }

    async fn sweep(&self) -> usize {
        match self.mirror.sweep().await {
            Ok(swept) => {
                if swept > 0 {
                    tracing::debug!("Swept {} leftover mirror files", swept);
                }
                swept
            }
            Err(e) => {
                tracing::warn!("Failed to sweep mirror leftovers: {}", e);
                0
            }
        }
    }

    async fn refresh(&self, entry: &ManifestEntry, report: &mut SyncReport) {
        let id = entry.id.as_str();

        match self.mirror.get(id).await {
            Ok(Some(local)) if local.freshness_stamp() == Some(&entry.stamp) => {
                report.fresh += 1;
                return;
            }
            Ok(_) => {}
            // An unreadable entry is treated as missing and rewritten.
            Err(e) => tracing::warn!("Failed to read mirror entry {}: {}", id, e),
        }

        tracing::debug!("Fetching {} (stamp {})", id, entry.stamp);
        let record = match self.remote.fetch_record(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Manifest lists {} but the remote has no record", id);
                report.missing.push(entry.id.clone());
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", id, e);
                report.failed.push(entry.id.clone());
                return;
            }
        };

        let stamped = Post {
            id: entry.id.clone(),
            stamp: Some(entry.stamp.clone()),
            ..record
        };

        match self.mirror.put(&stamped).await {
            Ok(()) => report.fetched.push(entry.id.clone()),
            Err(e) => {
                tracing::warn!("Failed to store {} in mirror: {}", id, e);
                report.failed.push(entry.id.clone());
            }
        }
    }
}
