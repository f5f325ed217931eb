//! Post page addresses.

use reqwest::Url;

/// Path of a post's detail page.
pub fn post_path(id: &str) -> String {
    format!("/post/{}", id)
}

/// Extract a post id from a page address.
///
/// `/post/{id}` style paths win; otherwise the `id` query parameter is
/// used. Relative addresses are accepted.
pub fn post_id_from_url(address: &str) -> Option<String> {
    let url = match Url::parse(address) {
        Ok(url) => url,
        Err(_) => Url::parse("http://localhost/").ok()?.join(address).ok()?,
    };

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if let Some(last) = segments.last() {
        if segments.contains(&"post") && *last != "post" {
            return Some((*last).to_string());
        }
    }

    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Slug a title the way post links spell it: lowercase, with every run of
/// characters outside `a-z0-9` collapsed to one `-`. Edges are not trimmed.
pub fn title_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Treat input as a page address when it looks like one, else as an id.
pub fn resolve_post_ref(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains('/') || input.contains('?') {
        post_id_from_url(input)
    } else {
        Some(input.to_string())
    }
}
