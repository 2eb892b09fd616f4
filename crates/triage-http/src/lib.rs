//! triage-http - HTTP client for a triage server.
//!
//! [`HttpClient`] wraps the REST API and implements
//! [`triage_core::PageSource`], so a [`triage_core::Pager`] can page through
//! a remote server exactly as it would through an in-process query service.

mod client;
mod endpoints;

pub use client::HttpClient;
