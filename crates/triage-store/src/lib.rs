//! triage-store - In-memory record store.
//!
//! [`MemoryStore`] implements [`triage_core::Store`] over a collection loaded
//! from a JSON dataset with [`load_posts`].

mod dataset;
mod memory;

pub use dataset::{load_posts, parse_posts};
pub use memory::MemoryStore;
