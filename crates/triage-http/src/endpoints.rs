//! REST endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

/// `/api`
pub const API: &str = "api";

/// `/api/posts`
pub const POSTS: &str = "posts";

/// `/api/tags`, and the tag collection under a post.
pub const TAGS: &str = "tags";

/// `/api/posts/{id}/status`
pub const STATUS: &str = "status";

/// `/health`
pub const HEALTH: &str = "health";

/// Body of `PATCH /api/posts/{id}/status`.
#[derive(Debug, Serialize)]
pub struct SetStatusRequest<'a> {
    pub status: &'a str,
}

/// Body of `POST /api/posts/{id}/tags`.
#[derive(Debug, Serialize)]
pub struct AddTagRequest<'a> {
    pub tag: &'a str,
}

/// Error body returned with every non-success response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}
