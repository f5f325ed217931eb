//! Like command implementation.

use async_trait::async_trait;

use crate::cli::args::LikeArgs;
use crate::engagement::LikeOutcome;
use crate::error::Result;
use crate::route::resolve_post_ref;
use crate::ui::UserInterface;

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};

/// Likes a post once per device.
pub struct LikeCommand {
    context: AppContext,
    args: LikeArgs,
}

impl LikeCommand {
    pub fn new(context: AppContext, args: LikeArgs) -> Self {
        Self { context, args }
    }
}

#[async_trait(?Send)]
impl Command for LikeCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(id) = resolve_post_ref(&self.args.id) else {
            ui.error(&format!("'{}' does not name a post", self.args.id));
            return Ok(CommandResult::failure(2));
        };

        let engagement = self.context.engagement()?;
        match engagement.like(&id).await? {
            LikeOutcome::Liked => ui.success(&format!("Liked {}", id)),
            LikeOutcome::AlreadyLiked => ui.status(&format!("You already liked {}", id)),
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilmixoConfig;
    use crate::content::{Post, Stamp};
    use crate::remote::{Counter, MockSource};
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<MockSource>) {
        let remote = Arc::new(MockSource::new());
        remote.publish(Post::new("abc", "Alien"), Stamp::Millis(1));
        (TempDir::new().unwrap(), remote)
    }

    fn command(temp: &TempDir, remote: &Arc<MockSource>, id: &str) -> LikeCommand {
        let ctx =
            AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(Arc::<MockSource>::clone(remote));
        LikeCommand::new(ctx, LikeArgs { id: id.to_string() })
    }

    #[tokio::test]
    async fn like_persists_across_runs() {
        let (temp, remote) = setup();

        let mut first = MockUI::new();
        command(&temp, &remote, "abc")
            .execute(&mut first)
            .await
            .unwrap();
        assert!(first.has_success("Liked abc"));

        let mut second = MockUI::new();
        command(&temp, &remote, "/post/abc")
            .execute(&mut second)
            .await
            .unwrap();
        assert!(second.statuses()[0].contains("already liked"));

        assert_eq!(remote.increments(), vec![("abc".to_string(), Counter::Likes)]);
        assert!(temp.path().join(".filmixo/likes.yml").exists());
    }

    #[tokio::test]
    async fn failed_increment_is_an_error() {
        let (temp, remote) = setup();
        remote.set_increments_failing(true);

        let result = command(&temp, &remote, "abc")
            .execute(&mut MockUI::new())
            .await;

        assert!(result.is_err());
        assert!(!temp.path().join(".filmixo/likes.yml").exists());
    }
}
