//! Query service composing filtering, sorting and slicing over a store.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::traits::{PageSource, Store};
use crate::types::{Post, Status, Tag};

use super::{CursorResolution, Filters, Page, PageRequest, matches, slice, sort_posts};

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    /// The page sent to the client.
    pub page: Page<Post>,

    /// True when the request carried a cursor that matched no post and the
    /// page restarted from the beginning.
    pub cursor_reset: bool,
}

/// Stateless, read-only query engine over a [`Store`].
///
/// Every query works on a fresh snapshot, so successive pages are consistent
/// as long as the collection and filters stay the same between calls.
#[derive(Debug, Clone)]
pub struct QueryService<S> {
    store: S,
}

impl<S: Store> QueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a filtered, paginated query.
    ///
    /// Bad filter input never fails the query; it widens it instead.
    #[instrument(skip(self))]
    pub fn query(&self, filters: &Filters, request: &PageRequest) -> Result<QueryOutput> {
        let spec = filters.normalize();
        let snapshot = self.store.list()?;

        let mut hits: Vec<Post> = snapshot
            .iter()
            .filter(|p| matches(p, &spec))
            .cloned()
            .collect();
        sort_posts(&mut hits);

        let cut = slice(&hits, request.cursor.as_deref(), request.limit as usize);

        let cursor_reset = cut.resolution == CursorResolution::Unknown;
        if cursor_reset {
            warn!(
                cursor = request.cursor.as_deref().unwrap_or_default(),
                "cursor matched no post, restarting from the first page"
            );
        }

        debug!(
            matched = hits.len(),
            returned = cut.items.len(),
            has_more = cut.next_cursor.is_some(),
            "query complete"
        );

        Ok(QueryOutput {
            page: Page {
                data: cut.items.to_vec(),
                next_cursor: cut.next_cursor,
            },
            cursor_reset,
        })
    }

    /// Every distinct tag across the whole collection, sorted.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<String>> {
        let snapshot = self.store.list()?;
        let tags: BTreeSet<String> = snapshot
            .iter()
            .flat_map(|p| p.tags())
            .map(|t| t.as_str().to_lowercase())
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Fetch one post by id.
    pub fn get(&self, id: &str) -> Result<Post> {
        self.store.get(id)
    }

    /// Change a post's status.
    #[instrument(skip(self))]
    pub fn set_status(&self, id: &str, status: Status) -> Result<Post> {
        self.store.set_status(id, status)
    }

    /// Tag a post.
    #[instrument(skip(self))]
    pub fn add_tag(&self, id: &str, tag: &Tag) -> Result<Post> {
        self.store.add_tag(id, tag)
    }

    /// Untag a post, ignoring case.
    #[instrument(skip(self))]
    pub fn remove_tag(&self, id: &str, tag: &str) -> Result<()> {
        self.store.remove_tag(id, tag)
    }
}

#[async_trait]
impl<S: Store> PageSource for QueryService<S> {
    type Item = Post;

    async fn fetch_page(&self, filters: &Filters, request: &PageRequest) -> Result<Page<Post>> {
        self.query(filters, request).map(|out| out.page)
    }
}
