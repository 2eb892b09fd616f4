//! Filter-and-sort query engine with cursor pagination.
//!
//! A query runs in five steps: raw [`Filters`] are normalized into a
//! [`FilterSpec`], every post of a store snapshot is tested with [`matches`],
//! survivors are ordered by [`sort_posts`], and [`slice`] resolves the cursor
//! and cuts one [`Page`]. [`QueryService`] strings these together.

mod filter;
mod matcher;
mod page;
mod service;
mod sort;

pub use filter::{FilterSpec, Filters};
pub use matcher::matches;
pub use page::{
    CursorResolution, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, Page, PageRequest, Slice,
    resolve_cursor, slice,
};
pub use service::{QueryOutput, QueryService};
pub use sort::{compare, sort_posts};
