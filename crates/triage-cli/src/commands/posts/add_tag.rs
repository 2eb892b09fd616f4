//! Add-tag command implementation.

use anyhow::{Context, Result};
use clap::Args;

use triage_http::HttpClient;

use crate::output;

#[derive(Args, Debug)]
pub struct AddTagArgs {
    /// Post id
    pub id: String,

    /// Tag to add (trimmed and lower-cased by the server)
    pub tag: String,
}

pub async fn run(client: &HttpClient, args: AddTagArgs) -> Result<()> {
    let post = client
        .add_tag(&args.id, &args.tag)
        .await
        .with_context(|| format!("Failed to tag post {}", args.id))?;

    let tags: Vec<&str> = post.tags().iter().map(|t| t.as_str()).collect();
    output::success(&format!("Post {} tags: {}", post.id, tags.join(", ")));
    Ok(())
}
