//! Page requests, cursor resolution and page slicing.

use serde::{Deserialize, Serialize};

use crate::traits::Keyed;

/// Page size used when the request does not give one.
pub const DEFAULT_LIMIT: u32 = 20;
/// Smallest accepted page size.
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// A request for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Key of the last item of the previous page.
    pub cursor: Option<String>,
    /// Page size, always within `MIN_LIMIT..=MAX_LIMIT`.
    pub limit: u32,
}

impl PageRequest {
    /// Request the first page.
    pub fn first(limit: u32) -> Self {
        Self {
            cursor: None,
            limit: Self::clamp(i64::from(limit)),
        }
    }

    /// Request the page after `cursor`.
    pub fn after(cursor: impl Into<String>, limit: u32) -> Self {
        Self {
            cursor: Some(cursor.into()),
            limit: Self::clamp(i64::from(limit)),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// A blank cursor counts as absent; a missing or non-numeric limit falls
    /// back to [`DEFAULT_LIMIT`] and numeric limits are clamped.
    pub fn from_raw(cursor: Option<&str>, limit: Option<&str>) -> Self {
        let cursor = cursor
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self {
            cursor,
            limit: Self::parse_limit(limit),
        }
    }

    /// Parse a raw limit, defaulting when absent or malformed.
    pub fn parse_limit(raw: Option<&str>) -> u32 {
        raw.and_then(|s| Self::parse_integer(s.trim()))
            .map(Self::clamp)
            .unwrap_or(DEFAULT_LIMIT)
    }

    /// Parse an integer, saturating values too wide for `i64`.
    fn parse_integer(s: &str) -> Option<i64> {
        if let Ok(n) = s.parse::<i64>() {
            return Some(n);
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(if negative { i64::MIN } else { i64::MAX })
    }

    /// Clamp a limit into `MIN_LIMIT..=MAX_LIMIT`.
    pub fn clamp(limit: i64) -> u32 {
        // The clamp bounds fit in u32, so the cast is lossless.
        limit.clamp(i64::from(MIN_LIMIT), i64::from(MAX_LIMIT)) as u32
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_LIMIT)
    }
}

/// One page of results, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items of this page, in result order.
    pub data: Vec<T>,

    /// Cursor for the next page, or `None` at the end of the results.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Returns true if another page follows this one.
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// How a cursor mapped onto the sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorResolution {
    /// No cursor was given; the page starts at the beginning.
    Start,
    /// The cursor was found; the page starts right after `index`.
    Resumed { index: usize },
    /// The cursor matched no item, so the page restarts from the beginning.
    /// Clients accumulating pages may see items again.
    Unknown,
}

/// A page cut from a sorted result set.
#[derive(Debug, PartialEq, Eq)]
pub struct Slice<'a, T> {
    pub items: &'a [T],
    pub next_cursor: Option<String>,
    pub resolution: CursorResolution,
}

/// Map a cursor onto a resume position within `sorted`.
///
/// Unknown cursors fail open to position 0.
pub fn resolve_cursor<T: Keyed>(sorted: &[T], cursor: Option<&str>) -> (usize, CursorResolution) {
    let Some(cursor) = cursor else {
        return (0, CursorResolution::Start);
    };

    match sorted.iter().position(|item| item.key() == cursor) {
        Some(index) => (index + 1, CursorResolution::Resumed { index }),
        None => (0, CursorResolution::Unknown),
    }
}

/// Cut the page of at most `limit` items that follows `cursor`.
///
/// The next cursor is the key of the page's last item, present only when the
/// page is non-empty and more items remain after it.
pub fn slice<'a, T: Keyed>(sorted: &'a [T], cursor: Option<&str>, limit: usize) -> Slice<'a, T> {
    let (start, resolution) = resolve_cursor(sorted, cursor);
    let start = start.min(sorted.len());
    let end = start.saturating_add(limit).min(sorted.len());
    let items = &sorted[start..end];

    let next_cursor = if end < sorted.len() {
        items.last().map(|item| item.key().to_string())
    } else {
        None
    };

    Slice {
        items,
        next_cursor,
        resolution,
    }
}
