//! Deterministic result ordering.

use std::cmp::Ordering;

use crate::types::Post;

/// Newest first; equal timestamps fall back to ascending id.
///
/// The ordering depends on record contents only, which is what keeps cursors
/// stable across calls.
pub fn compare(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort posts in place with [`compare`].
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(compare);
}
