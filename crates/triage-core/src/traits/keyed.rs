//! Identity trait for paginated items.

use crate::types::Post;

/// An item with a stable string key.
///
/// Cursors are keys, and page accumulation deduplicates by key.
pub trait Keyed {
    /// Returns the item's key.
    fn key(&self) -> &str;
}

impl Keyed for Post {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}
