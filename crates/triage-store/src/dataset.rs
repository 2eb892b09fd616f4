//! JSON dataset loading.
//!
//! The dataset is a JSON array of raw records:
//!
//! ```json
//! [{ "id": 1, "platform": "Twitter", "text": "...", "status": "flagged",
//!    "tags": ["spam"], "created_at": "2025-01-01T00:00:00Z" }]
//! ```
//!
//! Loading is lenient where a sensible default exists and strict where it
//! does not: unknown platforms and statuses fall back, unusable tags are
//! dropped, missing or non-string text becomes empty, but a record without a
//! valid timestamp fails the whole load.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use triage_core::Result;
use triage_core::error::{Error, InvalidInputError, TransportError};
use triage_core::{Platform, Post, PostId, Status, Tag};

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Transport(TransportError::Io {
        message: format!("{}: {}", path.display(), err),
    })
}

/// Record ids may be numbers or strings in the raw data.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: RawId,
    #[serde(default)]
    platform: Value,
    #[serde(default)]
    text: Value,
    #[serde(default)]
    status: Value,
    #[serde(default)]
    tags: Value,
    #[serde(default)]
    created_at: Option<String>,
}

impl RawPost {
    fn into_post(self) -> Result<Post> {
        let id = PostId::new(self.id.into_string())?;

        let platform = Platform::normalize(self.platform.as_str().unwrap_or_default());
        let status = Status::normalize(self.status.as_str().unwrap_or_default());
        let text = match self.text {
            Value::String(text) => text,
            other => {
                if !other.is_null() {
                    debug!(id = %id, "ignoring non-string text");
                }
                String::new()
            }
        };

        let created_at = match self.created_at.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| dataset_error(&id, format!("invalid created_at '{}': {}", raw, e)))?,
            None => return Err(dataset_error(&id, "missing created_at")),
        };

        let tags = parse_tags(&id, self.tags);

        Ok(Post::new(id, platform, text, status, created_at).with_tags(tags))
    }
}

fn dataset_error(id: &PostId, reason: impl Into<String>) -> Error {
    InvalidInputError::Dataset {
        id: id.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Keep the usable tags of a raw `tags` value. Anything but an array counts
/// as no tags.
fn parse_tags(id: &PostId, raw: Value) -> Vec<Tag> {
    let Value::Array(values) = raw else {
        if !raw.is_null() {
            debug!(id = %id, "ignoring non-array tags");
        }
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|value| match value.as_str().map(Tag::new) {
            Some(Ok(tag)) => Some(tag),
            _ => {
                debug!(id = %id, tag = %value, "dropping unusable tag");
                None
            }
        })
        .collect()
}

/// Parse a dataset from a JSON string.
pub fn parse_posts(json: &str) -> Result<Vec<Post>> {
    let raw: Vec<RawPost> = serde_json::from_str(json).map_err(|e| {
        Error::InvalidInput(InvalidInputError::Other {
            message: format!("malformed dataset: {}", e),
        })
    })?;

    raw.into_iter().map(RawPost::into_post).collect()
}

/// Read and parse a dataset file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_posts(path: impl AsRef<Path>) -> Result<Vec<Post>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| map_io(path, e))?;
    let posts = parse_posts(&content)?;
    debug!(count = posts.len(), "Loaded dataset");
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn tag_names(post: &Post) -> Vec<&str> {
        post.tags().iter().map(Tag::as_str).collect()
    }

    #[test]
    fn normalizes_raw_records() {
        let posts = parse_posts(
            r#"[
                {"id": 7, "platform": "TikTok", "text": "hi", "status": "Under_Review",
                 "tags": [" Spam", "spam", "", 3, "abuse"], "created_at": "2025-03-01T10:00:00Z"},
                {"id": "x-1", "platform": "myspace", "text": "yo", "status": "escalated",
                 "tags": "spam", "created_at": "2025-03-01T12:00:00+02:00"}
            ]"#,
        )
        .unwrap();

        let first = &posts[0];
        assert_eq!(first.id.as_str(), "7");
        assert_eq!(first.platform, Platform::Tiktok);
        assert_eq!(first.status, Status::UnderReview);
        assert_eq!(tag_names(first), vec!["spam", "abuse"]);

        let second = &posts[1];
        assert_eq!(second.id.as_str(), "x-1");
        assert_eq!(second.platform, Platform::Other);
        assert_eq!(second.status, Status::Flagged);
        assert!(second.tags().is_empty());
        assert_eq!(
            second.created_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let posts = parse_posts(r#"[{"id": 1, "created_at": "2025-01-01T00:00:00Z"}]"#).unwrap();
        assert_eq!(posts[0].platform, Platform::Other);
        assert_eq!(posts[0].status, Status::Flagged);
        assert_eq!(posts[0].text, "");
        assert!(posts[0].tags().is_empty());
    }

    #[test]
    fn non_string_fields_fall_back() {
        let posts = parse_posts(
            r#"[
                {"id": 1, "text": null, "created_at": "2025-01-01T00:00:00Z"},
                {"id": 2, "text": 17, "platform": 4, "status": ["dismissed"],
                 "created_at": "2025-01-02T00:00:00Z"}
            ]"#,
        )
        .unwrap();

        assert_eq!(posts[0].text, "");
        assert_eq!(posts[1].text, "");
        assert_eq!(posts[1].platform, Platform::Other);
        assert_eq!(posts[1].status, Status::Flagged);
    }

    #[test]
    fn bad_timestamp_names_the_record() {
        let err = parse_posts(r#"[{"id": 42, "created_at": "yesterday"}]"#).unwrap_err();
        match err {
            Error::InvalidInput(InvalidInputError::Dataset { id, .. }) => assert_eq!(id, "42"),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = parse_posts(r#"[{"id": 43}]"#).unwrap_err();
        assert!(err.to_string().contains("missing created_at"));
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        let err = parse_posts("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid input: malformed dataset:"));
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::Other { .. })));
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = parse_posts(r#"[{"id": "  ", "created_at": "2025-01-01T00:00:00Z"}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::PostId { .. })));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "platform": "reddit", "text": "a", "status": "dismissed", "tags": [], "created_at": "2025-01-01T00:00:00Z"}}]"#
        )
        .unwrap();

        let posts = load_posts(file.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].status, Status::Dismissed);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_posts(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Io { .. })));
    }
}
