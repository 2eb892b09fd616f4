//! Moderation tag type.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A normalized moderation tag.
///
/// Tags are trimmed and lower-cased on construction and must be between 1
/// and 30 characters long afterwards.
///
/// # Example
///
/// ```
/// use triage_core::Tag;
///
/// let tag = Tag::new("Spam ").unwrap();
/// assert_eq!(tag.as_str(), "spam");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Maximum tag length in characters.
    pub const MAX_LEN: usize = 30;

    /// Create a tag from raw input, normalizing and validating it.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let raw = s.as_ref();
        let normalized = Self::normalize(raw);
        Self::validate(raw, &normalized)?;
        Ok(Self(normalized))
    }

    /// Trim and lower-case a raw tag without validating its length.
    pub fn normalize(s: &str) -> String {
        s.trim().to_lowercase()
    }

    /// Returns the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(raw: &str, normalized: &str) -> Result<(), Error> {
        let len = normalized.chars().count();

        if len == 0 {
            return Err(InvalidInputError::Tag {
                value: raw.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if len > Self::MAX_LEN {
            return Err(InvalidInputError::Tag {
                value: raw.to_string(),
                reason: format!("exceeds maximum length of {} characters", Self::MAX_LEN),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}
