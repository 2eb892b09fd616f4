//! Set-status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use triage_core::Status;
use triage_http::HttpClient;

use crate::output;

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Post id
    pub id: String,

    /// New status: flagged, under_review or dismissed
    pub status: Status,
}

pub async fn run(client: &HttpClient, args: SetStatusArgs) -> Result<()> {
    let post = client
        .set_status(&args.id, args.status.as_str())
        .await
        .with_context(|| format!("Failed to update post {}", args.id))?;

    output::success(&format!("Post {} is now {}", post.id, post.status));
    Ok(())
}
