//! HTTP client implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use triage_core::error::{Error, ProtocolError, TransportError};
use triage_core::{Filters, Page, PageRequest, PageSource, Post, Result, ServerUrl};

use crate::endpoints::*;

fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// A 404 on an id-addressed endpoint means the post is unknown.
fn not_found_for(id: &str, err: Error) -> Error {
    match err {
        Error::Protocol(ref p) if p.status == StatusCode::NOT_FOUND.as_u16() => {
            Error::not_found(id)
        }
        other => other,
    }
}

/// Query-string pairs for a filtered page request. Tags repeat.
fn query_pairs(filters: &Filters, request: &PageRequest) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(ref platform) = filters.platform {
        pairs.push(("platform", platform.clone()));
    }
    if let Some(ref status) = filters.status {
        pairs.push(("status", status.clone()));
    }
    for tag in &filters.tags {
        pairs.push(("tag", tag.clone()));
    }
    if let Some(ref search) = filters.search {
        pairs.push(("search", search.clone()));
    }
    if let Some(ref cursor) = request.cursor {
        pairs.push(("cursor", cursor.clone()));
    }
    pairs.push(("limit", request.limit.to_string()));
    pairs
}

/// HTTP client for a triage server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    server: ServerUrl,
}

impl HttpClient {
    /// Create a new client for the given server.
    pub fn new(server: ServerUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("triage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, server })
    }

    /// Returns the server URL this client talks to.
    pub fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Fetch one filtered page of posts.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn list_posts(&self, filters: &Filters, request: &PageRequest) -> Result<Page<Post>> {
        let url = self.server.endpoint([API, POSTS]);
        let pairs = query_pairs(filters, request);
        debug!("GET posts");
        trace!(?pairs, "query parameters");

        let response = self
            .client
            .get(url)
            .query(&pairs)
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Fetch a single post.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let url = self.server.endpoint([API, POSTS, id]);
        debug!("GET post");

        let response = self.client.get(url).send().await.map_err(map_reqwest)?;

        self.handle_response(response)
            .await
            .map_err(|e| not_found_for(id, e))
    }

    /// Every distinct tag on the server, sorted.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let url = self.server.endpoint([API, TAGS]);
        debug!("GET tags");

        let response = self.client.get(url).send().await.map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Change a post's status. The server validates the status name.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn set_status(&self, id: &str, status: &str) -> Result<Post> {
        let url = self.server.endpoint([API, POSTS, id, STATUS]);
        debug!("PATCH status");

        let response = self
            .client
            .patch(url)
            .json(&SetStatusRequest { status })
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response)
            .await
            .map_err(|e| not_found_for(id, e))
    }

    /// Tag a post. The server normalizes and validates the tag.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn add_tag(&self, id: &str, tag: &str) -> Result<Post> {
        let url = self.server.endpoint([API, POSTS, id, TAGS]);
        debug!("POST tag");

        let response = self
            .client
            .post(url)
            .json(&AddTagRequest { tag })
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response)
            .await
            .map_err(|e| not_found_for(id, e))
    }

    /// Untag a post, ignoring case.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn remove_tag(&self, id: &str, tag: &str) -> Result<()> {
        let url = self.server.endpoint([API, POSTS, id, TAGS, tag]);
        debug!("DELETE tag");

        let response = self.client.delete(url).send().await.map_err(map_reqwest)?;

        self.handle_empty_response(response)
            .await
            .map_err(|e| not_found_for(id, e))
    }

    /// Check that the server is up.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn health(&self) -> Result<()> {
        let url = self.server.endpoint([HEALTH]);

        let response = self.client.get(url).send().await.map_err(map_reqwest)?;

        self.handle_empty_response(response).await
    }

    /// Parse a JSON body on success, or the error body otherwise.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(map_reqwest)
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Expect a success status and ignore the body.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

#[async_trait]
impl PageSource for HttpClient {
    type Item = Post;

    async fn fetch_page(&self, filters: &Filters, request: &PageRequest) -> Result<Page<Post>> {
        self.list_posts(filters, request).await
    }
}
