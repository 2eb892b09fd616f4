//! Predicate matching of posts against a filter spec.

use crate::types::Post;

use super::FilterSpec;

/// Decide whether `post` passes every criterion of `spec`.
///
/// Platform, status, tags (any-of) and text search are ANDed together; an
/// unset criterion always passes.
pub fn matches(post: &Post, spec: &FilterSpec) -> bool {
    let platform_ok = spec.platform.is_none_or(|p| p == post.platform);
    let status_ok = spec.status.is_none_or(|s| s == post.status);
    let tags_ok = spec.tags.is_empty()
        || post
            .tags()
            .iter()
            .any(|t| spec.tags.contains(&t.as_str().to_lowercase()));
    let search_ok = spec
        .search
        .as_deref()
        .is_none_or(|needle| post.text.to_lowercase().contains(needle));

    platform_ok && status_ok && tags_ok && search_ok
}
