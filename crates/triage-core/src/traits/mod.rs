//! Core traits for record storage and page fetching.

mod keyed;
mod page_source;
mod store;

pub use keyed::Keyed;
pub use page_source::PageSource;
pub use store::{Snapshot, Store};
