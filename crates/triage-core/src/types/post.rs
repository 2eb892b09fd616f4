//! Moderation record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Platform, PostId, Status, Tag};

/// A flagged social-media post awaiting moderation.
///
/// Tags are kept unique within a post; use [`Post::add_tag`] and
/// [`Post::remove_tag`] rather than editing the list directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier, never reused.
    pub id: PostId,

    /// Platform the post was flagged on.
    pub platform: Platform,

    /// Post content, searched case-insensitively.
    pub text: String,

    /// Moderation status.
    pub status: Status,

    #[serde(default, deserialize_with = "unique_tags")]
    tags: Vec<Tag>,

    /// Creation time, the primary sort key.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with no tags.
    pub fn new(
        id: PostId,
        platform: Platform,
        text: impl Into<String>,
        status: Status,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            platform,
            text: text.into(),
            status,
            tags: Vec::new(),
            created_at,
        }
    }

    /// Add tags in order, skipping ones already present.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Returns the tags in insertion order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns true if the post carries `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = Tag::normalize(tag);
        self.tags.iter().any(|t| t.as_str() == wanted)
    }

    /// Append a tag. Returns false if it was already present.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag, ignoring case. Returns false if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let wanted = Tag::normalize(tag);
        let before = self.tags.len();
        self.tags.retain(|t| t.as_str() != wanted);
        self.tags.len() != before
    }
}

/// Drop repeated tags, keeping the first occurrence.
fn unique_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tags = Vec::<Tag>::deserialize(deserializer)?;
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    Ok(unique)
}
