//! Client-side incremental fetching.

mod accumulator;
mod controller;

pub use accumulator::Accumulator;
pub use controller::{FetchOutcome, Pager, PagerStatus};
