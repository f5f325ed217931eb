//! Stats command implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::format::format_count;
use crate::mirror::MirrorStore;
use crate::ui::UserInterface;

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};

/// Shows the site-wide post count next to the mirror's.
pub struct StatsCommand {
    context: AppContext,
}

impl StatsCommand {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }
}

#[async_trait(?Send)]
impl Command for StatsCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = self.context.remote()?.fetch_manifest().await?;
        let mirrored = self.context.mirror().list_keys().await?.len();

        ui.message(&format!("Posts: {}", format_count(manifest.total())));
        ui.status(&format!("Active in manifest: {}", manifest.len()));
        ui.status(&format!("Mirrored locally: {}", mirrored));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilmixoConfig;
    use crate::content::{Post, Stamp};
    use crate::remote::MockSource;
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn shows_total_posts() {
        let temp = TempDir::new().unwrap();
        let remote = Arc::new(MockSource::new());
        remote.publish(Post::new("a", "A"), Stamp::Millis(1));
        remote.set_total_posts(1234);
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(remote);
        let mut ui = MockUI::new();

        StatsCommand::new(ctx).execute(&mut ui).await.unwrap();

        assert_eq!(ui.messages(), &["Posts: 1.2K".to_string()]);
        assert!(ui.statuses().iter().any(|s| s == "Active in manifest: 1"));
        assert!(ui.statuses().iter().any(|s| s == "Mirrored locally: 0"));
    }

    #[tokio::test]
    async fn manifest_failure_is_an_error() {
        let temp = TempDir::new().unwrap();
        let remote = Arc::new(MockSource::new());
        remote.set_manifest_down(true);
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(remote);

        assert!(StatsCommand::new(ctx)
            .execute(&mut MockUI::new())
            .await
            .is_err());
    }
}
