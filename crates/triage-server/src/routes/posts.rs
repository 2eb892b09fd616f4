//! `/api/posts` handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use tracing::debug;

use triage_core::{Filters, Page, PageRequest, Post, Status, Tag};

use super::{json_body, string_field};
use crate::error::ApiError;
use crate::state::AppState;

/// Split a raw query string into filters and a page request.
///
/// `tag` may repeat; for every other parameter the first occurrence wins.
fn parse_query(raw: &str) -> (Filters, PageRequest) {
    let mut filters = Filters::new();
    let mut cursor: Option<String> = None;
    let mut limit: Option<String> = None;

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match &*key {
            "platform" if filters.platform.is_none() => filters.platform = Some(value.into_owned()),
            "status" if filters.status.is_none() => filters.status = Some(value.into_owned()),
            "search" if filters.search.is_none() => filters.search = Some(value.into_owned()),
            "tag" => filters.tags.push(value.into_owned()),
            "cursor" if cursor.is_none() => cursor = Some(value.into_owned()),
            "limit" if limit.is_none() => limit = Some(value.into_owned()),
            _ => {}
        }
    }

    let request = PageRequest::from_raw(cursor.as_deref(), limit.as_deref());
    (filters, request)
}

/// `GET /api/posts`
pub async fn list(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Page<Post>>, ApiError> {
    let (filters, request) = parse_query(raw.as_deref().unwrap_or_default());
    let output = state.queries().query(&filters, &request)?;
    Ok(Json(output.page))
}

/// `GET /api/posts/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.queries().get(&id)?))
}

/// `PATCH /api/posts/:id/status`
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, ApiError> {
    let body = json_body(&headers, &body)?;
    let status: Status = string_field(&body, "status")?.parse()?;

    let post = state.queries().set_status(&id, status)?;
    debug!(id = %id, %status, "status changed");
    Ok(Json(post))
}

/// `POST /api/posts/:id/tags`
pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, ApiError> {
    let body = json_body(&headers, &body)?;
    let tag = Tag::new(string_field(&body, "tag")?).map_err(|_| {
        ApiError::BadRequest(format!(
            "Tag must be 1-{} characters after trimming",
            Tag::MAX_LEN
        ))
    })?;

    let post = state.queries().add_tag(&id, &tag)?;
    debug!(id = %id, %tag, "tag added");
    Ok(Json(post))
}

/// `DELETE /api/posts/:id/tags/:tag`
pub async fn remove_tag(
    State(state): State<AppState>,
    Path((id, tag)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let tag = Tag::normalize(&tag);
    if tag.is_empty() {
        return Err(ApiError::BadRequest("Tag required".into()));
    }

    state.queries().remove_tag(&id, &tag)?;
    debug!(id = %id, tag = %tag, "tag removed");
    Ok(StatusCode::NO_CONTENT)
}
