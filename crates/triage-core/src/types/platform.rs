//! Source platform of a post.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The social platform a post was flagged on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Tiktok,
    Reddit,
    Other,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 6] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Reddit,
        Platform::Other,
    ];

    /// Parse a platform name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for names outside the platform set.
    pub fn parse(s: &str) -> Option<Self> {
        let v = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == v)
    }

    /// Parse a platform name, falling back to [`Platform::Other`].
    pub fn normalize(s: &str) -> Self {
        Self::parse(s).unwrap_or(Platform::Other)
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Reddit => "reddit",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
