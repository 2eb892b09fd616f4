//! Page source trait.

use async_trait::async_trait;

use crate::Result;
use crate::query::{Filters, Page, PageRequest};

use super::Keyed;

/// Anything that can answer a filtered page request.
///
/// Implemented in-process by [`QueryService`](crate::QueryService) and over
/// HTTP by the client crate. The [`Pager`](crate::Pager) drives a source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type of the pages.
    type Item: Keyed + Clone + Send + Sync + 'static;

    /// Fetch one page of items matching `filters`.
    async fn fetch_page(
        &self,
        filters: &Filters,
        request: &PageRequest,
    ) -> Result<Page<Self::Item>>;
}
