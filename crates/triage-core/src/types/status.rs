//! Moderation status of a post.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Where a post stands in the moderation workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Flagged,
    UnderReview,
    Dismissed,
}

impl Status {
    /// Every status, in workflow order.
    pub const ALL: [Status; 3] = [Status::Flagged, Status::UnderReview, Status::Dismissed];

    /// Parse a status name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let v = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str() == v)
    }

    /// Parse a status name, falling back to [`Status::Flagged`].
    pub fn normalize(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Flagged => "flagged",
            Status::UnderReview => "under_review",
            Status::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Strict parse of an exact wire name, used where an unknown status must
    /// be rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or_else(|| {
            InvalidInputError::Status {
                value: s.to_string(),
            }
            .into()
        })
    }
}
