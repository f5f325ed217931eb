//! Shared display helpers for posts and sync reports.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::category::display_name;
use crate::content::Post;
use crate::error::Result;
use crate::format::{format_count, format_date, time_ago};
use crate::route::post_path;
use crate::sync::SyncReport;
use crate::ui::UserInterface;

/// One-line summary of a post for lists.
pub fn post_line(post: &Post, now: DateTime<Utc>) -> String {
    let mut line = if post.title.is_empty() {
        post.id.clone()
    } else {
        post.title.clone()
    };

    if let Some(category) = post.category.as_deref() {
        line.push_str(&format!(" [{}]", display_name(category).unwrap_or(category)));
    }
    if let Some(when) = post.recency() {
        line.push_str(&format!(" · {}", time_ago(when, now)));
    }
    line.push_str(&format!(
        " · {} views · {} likes",
        format_count(post.views),
        format_count(post.likes)
    ));
    line
}

/// Print posts as a list; ids go to verbose detail.
pub fn show_post_list(ui: &mut dyn UserInterface, posts: &[Post], now: DateTime<Utc>) {
    for post in posts {
        ui.message(&format!("  {}", post_line(post, now)));
        ui.detail(&post_path(&post.id));
    }
}

/// Print a full post.
pub fn show_post_detail(ui: &mut dyn UserInterface, post: &Post) {
    let title = if post.title.is_empty() {
        post.id.as_str()
    } else {
        post.title.as_str()
    };
    ui.show_header(title);

    let mut meta = Vec::new();
    if let Some(category) = post.category.as_deref() {
        meta.push(display_name(category).unwrap_or(category).to_string());
    }
    if let Some(when) = post.recency() {
        meta.push(format_date(when));
    }
    meta.push(format!("{} views", format_count(post.views)));
    meta.push(format!("{} likes", format_count(post.likes)));
    ui.status(&meta.join(" · "));

    if let Some(image) = post.media_image.as_deref() {
        ui.detail(image);
    }

    for paragraph in &post.paragraphs {
        ui.message("");
        ui.message(paragraph);
    }
    ui.message("");
    ui.show_hint(&post_path(&post.id));
}

/// Report a reconciliation pass.
pub fn show_sync_report(ui: &mut dyn UserInterface, report: &SyncReport) {
    if report.aborted {
        ui.warning(&format!(
            "{}; showing the local mirror as is",
            report.summary()
        ));
        return;
    }

    if report.is_complete() {
        ui.success(&format!("Mirror synced: {}", report.summary()));
    } else {
        ui.warning(&format!("Mirror partly synced: {}", report.summary()));
    }

    for id in &report.fetched {
        ui.detail(&format!("fetched {}", id));
    }
    for id in &report.missing {
        ui.detail(&format!("missing {}", id));
    }
    for id in &report.failed {
        ui.warning(&format!("Could not refresh {}", id));
    }
}

/// Print a value as pretty JSON.
pub fn show_json<T: Serialize>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    ui.message(&serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Stamp;
    use crate::ui::MockUI;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn post_line_includes_category_and_counts() {
        let mut post = Post::new("p1", "Heat")
            .with_category("thriller")
            .with_upload_time("2024-03-08");
        post.views = 1500;

        let line = post_line(&post, now());

        assert!(line.starts_with("Heat [Thriller]"));
        assert!(line.contains("1.5K views"));
        assert!(line.contains("0 likes"));
    }

    #[test]
    fn post_line_falls_back_to_id() {
        let post = Post::new("p1", "");
        assert!(post_line(&post, now()).starts_with("p1"));
    }

    #[test]
    fn detail_prints_paragraphs_and_path() {
        let post = Post::new("p1", "Heat")
            .with_paragraph("One.")
            .with_paragraph("Two.")
            .with_stamp(Stamp::Millis(0));
        let mut ui = MockUI::new();

        show_post_detail(&mut ui, &post);

        assert_eq!(ui.headers(), &["Heat".to_string()]);
        assert!(ui.has_message("One."));
        assert!(ui.has_message("Two."));
        assert_eq!(ui.hints(), &["/post/p1".to_string()]);
    }

    #[test]
    fn sync_report_variants() {
        let mut ui = MockUI::new();
        show_sync_report(&mut ui, &SyncReport::default());
        assert!(ui.has_success("Mirror synced"));

        let report = SyncReport {
            manifest_size: 2,
            failed: vec!["b".to_string()],
            ..SyncReport::default()
        };
        show_sync_report(&mut ui, &report);
        assert!(ui.has_warning("partly synced"));
        assert!(ui.has_warning("Could not refresh b"));
    }

    #[test]
    fn aborted_report_warns() {
        let mut ui = MockUI::new();
        let report = SyncReport {
            aborted: true,
            ..SyncReport::default()
        };

        show_sync_report(&mut ui, &report);

        assert!(ui.has_warning("manifest unavailable"));
        assert!(ui.successes().is_empty());
    }
}
