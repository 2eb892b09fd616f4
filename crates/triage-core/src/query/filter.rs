//! Raw filter input and its canonical form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Platform, Status, Tag};

/// Literal accepted as "no filter" for platform and status.
const WILDCARD: &str = "all";

/// Filter input as it arrives from a query string or command-line flags.
///
/// Nothing here is validated; [`Filters::normalize`] degrades anything
/// unusable to "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Platform name or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Status name or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Tags, any of which must be present on a post.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Case-insensitive substring of the post text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Filters {
    /// Filters that match every post.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Canonicalize into a [`FilterSpec`].
    ///
    /// Values are trimmed and lower-cased. Absent, blank and `all` selectors
    /// become wildcards, as do platform or status names outside the known
    /// sets. Blank tags are dropped and duplicates collapse.
    pub fn normalize(&self) -> FilterSpec {
        let platform = selector(self.platform.as_deref()).and_then(|v| {
            let parsed = Platform::parse(&v);
            if parsed.is_none() {
                debug!(platform = %v, "unknown platform filter, matching all");
            }
            parsed
        });

        let status = selector(self.status.as_deref()).and_then(|v| {
            let parsed = Status::parse(&v);
            if parsed.is_none() {
                debug!(status = %v, "unknown status filter, matching all");
            }
            parsed
        });

        let tags = self
            .tags
            .iter()
            .map(|t| Tag::normalize(t))
            .filter(|t| !t.is_empty())
            .collect();

        let search = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        FilterSpec {
            platform,
            status,
            tags,
            search,
        }
    }
}

/// Trim and lower-case a selector, mapping blank and `all` to `None`.
fn selector(raw: Option<&str>) -> Option<String> {
    let v = raw?.trim().to_lowercase();
    if v.is_empty() || v == WILDCARD {
        None
    } else {
        Some(v)
    }
}

/// Canonical inclusion criteria. `None` and an empty tag set mean "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub platform: Option<Platform>,
    pub status: Option<Status>,
    pub tags: BTreeSet<String>,
    pub search: Option<String>,
}

impl FilterSpec {
    /// Returns true if this spec matches every post.
    pub fn is_wildcard(&self) -> bool {
        self.platform.is_none()
            && self.status.is_none()
            && self.tags.is_empty()
            && self.search.is_none()
    }
}
