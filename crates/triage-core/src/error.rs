//! Error types for triage.
//!
//! A single error enum is shared by every crate in the workspace, with
//! explicit variants for transport, lookup, protocol and input failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for triage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport errors (connection, timeout, local IO).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The requested post does not exist.
    #[error("post not found: {id}")]
    NotFound { id: String },

    /// Protocol errors (non-success responses from the server).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (invalid tag, status, URL or dataset entry).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Returns true if this error means the target post is unknown.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Protocol(p) => p.status == 404,
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

/// A non-success response from the triage server.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the `error` field of the response body.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the server rejected the request as malformed.
    pub fn is_bad_request(&self) -> bool {
        self.status == 400 || self.status == 415
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid post identifier.
    #[error("invalid post id '{value}': {reason}")]
    PostId { value: String, reason: String },

    /// Invalid tag.
    #[error("invalid tag '{value}': {reason}")]
    Tag { value: String, reason: String },

    /// Status outside the moderation status set.
    #[error("invalid status '{value}': expected one of flagged, under_review, dismissed")]
    Status { value: String },

    /// Invalid server URL.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },

    /// A dataset entry that cannot be loaded.
    #[error("invalid dataset entry '{id}': {reason}")]
    Dataset { id: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
