//! In-memory store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument};

use triage_core::error::{Error, InvalidInputError};
use triage_core::{Post, Result, Snapshot, Status, Store, Tag};

use crate::dataset::load_posts;

/// A [`Store`] holding the whole collection in memory.
///
/// The collection sits behind an `Arc`, so [`Store::list`] hands out a
/// snapshot without copying. A mutation copies the collection only while an
/// older snapshot is still alive; readers never observe a half-applied change.
///
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: Snapshot,
    index: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over `posts`, keeping their order.
    ///
    /// Fails if two posts share an id.
    pub fn from_posts(posts: Vec<Post>) -> Result<Self> {
        let mut index = HashMap::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            if index.insert(post.id.to_string(), i).is_some() {
                return Err(InvalidInputError::Dataset {
                    id: post.id.to_string(),
                    reason: "duplicate id".to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            inner: Arc::new(RwLock::new(Inner {
                posts: Arc::new(posts),
                index,
            })),
        })
    }

    /// Load a JSON dataset file into a new store.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::from_posts(load_posts(path)?)?;
        debug!(count = store.len(), "Opened store");
        Ok(store)
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.read().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().posts.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` to the post with `id` under the write lock.
    fn update<R>(&self, id: &str, f: impl FnOnce(&mut Post) -> R) -> Result<R> {
        let mut inner = self.write();
        let Some(&i) = inner.index.get(id) else {
            return Err(Error::not_found(id));
        };
        let posts = Arc::make_mut(&mut inner.posts);
        Ok(f(&mut posts[i]))
    }
}

impl Store for MemoryStore {
    fn get(&self, id: &str) -> Result<Post> {
        let inner = self.read();
        inner
            .index
            .get(id)
            .map(|&i| inner.posts[i].clone())
            .ok_or_else(|| Error::not_found(id))
    }

    fn list(&self) -> Result<Snapshot> {
        Ok(Arc::clone(&self.read().posts))
    }

    #[instrument(skip(self))]
    fn set_status(&self, id: &str, status: Status) -> Result<Post> {
        let post = self.update(id, |post| {
            post.status = status;
            post.clone()
        })?;
        debug!(id, %status, "Updated status");
        Ok(post)
    }

    #[instrument(skip(self))]
    fn add_tag(&self, id: &str, tag: &Tag) -> Result<Post> {
        let (added, post) = self.update(id, |post| (post.add_tag(tag.clone()), post.clone()))?;
        debug!(id, %tag, added, "Tagged post");
        Ok(post)
    }

    #[instrument(skip(self))]
    fn remove_tag(&self, id: &str, tag: &str) -> Result<()> {
        let removed = self.update(id, |post| post.remove_tag(tag))?;
        debug!(id, tag, removed, "Untagged post");
        Ok(())
    }
}
