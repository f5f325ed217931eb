//! Category command implementation.

use async_trait::async_trait;
use chrono::Utc;

use crate::category::{is_known, CategoryFeed, CategoryOutcome};
use crate::cli::args::CategoryArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::AppContext;
use super::dispatcher::{Command, CommandResult};
use super::display;

/// Shows the newest posts of one category, straight from the remote.
pub struct CategoryCommand {
    context: AppContext,
    args: CategoryArgs,
}

impl CategoryCommand {
    pub fn new(context: AppContext, args: CategoryArgs) -> Self {
        Self { context, args }
    }
}

#[async_trait(?Send)]
impl Command for CategoryCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let slug = self.args.slug.trim().to_lowercase();
        if slug != "all" && !is_known(&slug) {
            ui.warning(&format!(
                "Unknown category '{}', showing all posts",
                self.args.slug
            ));
        }

        let feed = CategoryFeed::new(
            self.context.remote()?,
            self.context.config().category.page_size,
        );

        let mut spinner = ui.start_spinner("Loading posts...");
        let outcome = feed.load(&slug).await;
        spinner.finish_clear();

        let page = match outcome? {
            CategoryOutcome::Loaded(page) => page,
            CategoryOutcome::Busy => {
                ui.warning("A category load is already running");
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            display::show_json(ui, &page)?;
            return Ok(CommandResult::success());
        }

        ui.show_header(&page.heading);
        if page.posts.is_empty() {
            ui.message("No posts in this category yet.");
        } else {
            display::show_post_list(ui, &page.posts, Utc::now());
        }

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

    fn context(temp: &TempDir) -> AppContext {
        let remote = Arc::new(MockSource::new());
        remote.publish(
            Post::new("h1", "The Thing").with_category("horror"),
            Stamp::Millis(1),
        );
        remote.publish(
            Post::new("c1", "Airplane!").with_category("comedy"),
            Stamp::Millis(2),
        );
        AppContext::new(temp.path(), FilmixoConfig::default()).with_remote(remote)
    }

    fn args(slug: &str) -> CategoryArgs {
        CategoryArgs {
            slug: slug.to_string(),
            json: false,
        }
    }

    #[tokio::test]
    async fn shows_category_heading_and_posts() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        CategoryCommand::new(context(&temp), args("Horror"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(ui.headers(), &["Horror".to_string()]);
        assert_eq!(ui.messages().len(), 1);
        assert!(ui.has_message("The Thing"));
    }

    #[tokio::test]
    async fn unknown_slug_warns_and_lists_all() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        CategoryCommand::new(context(&temp), args("western"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(ui.has_warning("Unknown category 'western'"));
        assert_eq!(ui.headers(), &["All Posts".to_string()]);
        assert_eq!(ui.messages().len(), 2);
    }

    #[tokio::test]
    async fn empty_category() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        CategoryCommand::new(context(&temp), args("drama"))
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(ui.has_message("No posts in this category yet."));
    }
}
