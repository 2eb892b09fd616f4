//! triage-core - Core types, query engine and page controller.
//!
//! The crate is split along the request path:
//!
//! - [`types`] holds the moderation record ([`Post`]) and its validated parts.
//! - [`query`] turns raw filters into a deterministic, cursor-paginated
//!   result set over a [`Store`] snapshot.
//! - [`pager`] is the client-side controller that accumulates pages from any
//!   [`PageSource`] while discarding superseded responses.

pub mod error;
pub mod pager;
pub mod query;
pub mod traits;
pub mod types;

pub use error::Error;
pub use pager::{Accumulator, FetchOutcome, Pager, PagerStatus};
pub use query::{
    CursorResolution, FilterSpec, Filters, Page, PageRequest, QueryOutput, QueryService,
};
pub use traits::{Keyed, PageSource, Snapshot, Store};
pub use types::{Platform, Post, PostId, ServerUrl, Status, Tag};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
