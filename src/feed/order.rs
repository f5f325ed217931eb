//! Feed ordering.

use std::cmp::Ordering;

use crate::content::Post;

/// Newest first by [`Post::recency`]; undated posts last; ties by id.
pub fn compare_recency(a: &Post, b: &Post) -> Ordering {
    let by_time = match (a.recency(), b.recency()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.id.cmp(&b.id))
}

/// Sort posts for the feed.
pub fn sort_by_recency(posts: &mut [Post]) {
    posts.sort_by(compare_recency);
}
