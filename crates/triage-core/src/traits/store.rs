//! Record store trait.

use std::sync::Arc;

use crate::Result;
use crate::types::{Post, Status, Tag};

/// An immutable view of the whole collection at one point in time.
pub type Snapshot = Arc<Vec<Post>>;

/// The collection of moderation records.
///
/// Queries only ever see [`Store::list`] snapshots; mutations touch a single
/// field of a single record. Every id-addressed operation fails with
/// [`Error::NotFound`](crate::Error::NotFound) for unknown ids.
pub trait Store: Send + Sync {
    /// Fetch one post by id.
    fn get(&self, id: &str) -> Result<Post>;

    /// Take a snapshot of every post.
    fn list(&self) -> Result<Snapshot>;

    /// Replace a post's status and return the updated post.
    fn set_status(&self, id: &str, status: Status) -> Result<Post>;

    /// Add a tag to a post. Adding a tag that is already present is a no-op.
    fn add_tag(&self, id: &str, tag: &Tag) -> Result<Post>;

    /// Remove a tag from a post, ignoring case. Removing an absent tag is a
    /// no-op.
    fn remove_tag(&self, id: &str, tag: &str) -> Result<()>;
}

impl<T: Store + ?Sized> Store for Arc<T> {
    fn get(&self, id: &str) -> Result<Post> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Snapshot> {
        (**self).list()
    }

    fn set_status(&self, id: &str, status: Status) -> Result<Post> {
        (**self).set_status(id, status)
    }

    fn add_tag(&self, id: &str, tag: &Tag) -> Result<Post> {
        (**self).add_tag(id, tag)
    }

    fn remove_tag(&self, id: &str, tag: &str) -> Result<()> {
        (**self).remove_tag(id, tag)
    }
}
