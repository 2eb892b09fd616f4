//! Core moderation types.
//!
//! These types enforce record invariants at construction time: a [`Tag`] is
//! always trimmed, lower-cased and 1-30 characters long, a [`Status`] is always
//! a member of the moderation status set.

mod platform;
mod post;
mod post_id;
mod server_url;
mod status;
mod tag;

pub use platform::Platform;
pub use post::Post;
pub use post_id::PostId;
pub use server_url::ServerUrl;
pub use status::Status;
pub use tag::Tag;
