//! Post command implementation.
//!
//! Shows one post, preferring the local mirror, and counts a view. A
//! reference that is not a mirrored id may also be a post's title slug.

use async_trait::async_trait;

use crate::cli::args::PostArgs;
use crate::content::Post;
use crate::engagement::{Engagement, ViewOutcome};
use crate::error::{FilmixoError, Result};
use crate::mirror::MirrorStore;
use crate::route::{resolve_post_ref, title_slug};
use crate::ui::UserInterface;

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

pub struct PostCommand {
    context: AppContext,
    args: PostArgs,
}

impl PostCommand {
    pub fn new(context: AppContext, args: PostArgs) -> Self {
        Self { context, args }
    }

    /// Look a reference up in the mirror by id, then by title slug. Read
    /// failures count as a miss so the remote still gets asked.
    async fn find_mirrored(&self, reference: &str) -> Option<Post> {
        let mirror = self.context.mirror();
        match mirror.get(reference).await {
            Ok(Some(post)) => return Some(post),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read mirrored {}: {}", reference, e),
        }

        match mirror.list_all().await {
            Ok(posts) => posts
                .into_iter()
                .find(|post| title_slug(&post.title) == reference),
            Err(e) => {
                tracing::warn!("Failed to scan the mirror for {}: {}", reference, e);
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl Command for PostCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(id) = resolve_post_ref(&self.args.reference) else {
            ui.error(&format!("'{}' does not name a post", self.args.reference));
            return Ok(CommandResult::failure(2));
        };

        let post = match self.find_mirrored(&id).await {
            Some(post) => post,
            None => {
                tracing::debug!("{} not mirrored, asking the remote", id);
                self.context
                    .remote()?
                    .fetch_record(&id)
                    .await?
                    .ok_or_else(|| FilmixoError::UnknownPost { id: id.clone() })?
            }
        };

        display::show_post_detail(ui, &post);

        match self.context.remote() {
            Ok(remote) => {
                let engagement = Engagement::new(remote, self.context.ledger()?);
                match engagement.record_view(&post.id).await {
                    ViewOutcome::Counted => ui.detail("View recorded"),
                    ViewOutcome::AlreadyCounted => {}
                    ViewOutcome::Failed => ui.warning("Could not record the view"),
                }
            }
            Err(e) => ui.detail(&format!("View not recorded: {}", e)),
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilmixoConfig;
    use crate::content::{Post, Stamp};
    use crate::mirror::DiskMirror;
    use crate::remote::{Counter, MockSource};
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn remote() -> Arc<MockSource> {
        let remote = Arc::new(MockSource::new());
        remote.publish(
            Post::new("abc", "Alien").with_paragraph("In space."),
            Stamp::Millis(1),
        );
        remote
    }

    fn args(reference: &str) -> PostArgs {
        PostArgs {
            reference: reference.to_string(),
        }
    }

    #[tokio::test]
    async fn falls_back_to_remote_and_counts_view() {
        let temp = TempDir::new().unwrap();
        let remote = remote();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default())
            .with_remote(Arc::<MockSource>::clone(&remote));
        let mut ui = MockUI::new();

        let result = PostCommand::new(ctx, args("/post/abc"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["Alien".to_string()]);
        assert!(ui.has_message("In space."));
        assert_eq!(remote.increments(), vec![("abc".to_string(), Counter::Views)]);
    }

    #[tokio::test]
    async fn reads_mirror_without_remote() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default());
        DiskMirror::new(temp.path().join(".filmixo/mirror"))
            .put(&Post::new("m1", "Mirrored"))
            .await
            .unwrap();
        let mut ui = MockUI::new();

        let result = PostCommand::new(ctx, args("post.html?id=m1"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["Mirrored".to_string()]);
        assert!(ui.details().iter().any(|d| d.contains("View not recorded")));
    }

    #[tokio::test]
    async fn corrupt_mirror_entry_falls_back_to_remote() {
        let temp = TempDir::new().unwrap();
        let mirror = DiskMirror::new(temp.path().join(".filmixo/mirror"));
        std::fs::create_dir_all(mirror.root()).unwrap();
        std::fs::write(mirror.entry_path("abc"), "{not json").unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(remote());
        let mut ui = MockUI::new();

        let result = PostCommand::new(ctx, args("abc"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["Alien".to_string()]);
    }

    #[tokio::test]
    async fn title_slug_resolves_from_mirror() {
        let temp = TempDir::new().unwrap();
        let remote = remote();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default())
            .with_remote(Arc::<MockSource>::clone(&remote));
        ctx.mirror()
            .put(&Post::new("m1", "Alien: Romulus"))
            .await
            .unwrap();
        let mut ui = MockUI::new();

        let result = PostCommand::new(ctx, args("alien-romulus"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["Alien: Romulus".to_string()]);
        assert!(remote.fetched().is_empty());
        assert_eq!(remote.increments(), vec![("m1".to_string(), Counter::Views)]);
    }

    #[tokio::test]
    async fn unknown_post_is_an_error() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(remote());

        let err = PostCommand::new(ctx, args("nope"))
            .execute(&mut MockUI::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FilmixoError::UnknownPost { id } if id == "nope"));
    }

    #[tokio::test]
    async fn blank_reference_fails() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path(), FilmixoConfig::default());
        let mut ui = MockUI::new();

        let result = PostCommand::new(ctx, args("  "))
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(result.exit_code, 2);
    }
}
