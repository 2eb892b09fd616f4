//! Remove-tag command implementation.

use anyhow::{Context, Result};
use clap::Args;

use triage_http::HttpClient;

use crate::output;

#[derive(Args, Debug)]
pub struct RemoveTagArgs {
    /// Post id
    pub id: String,

    /// Tag to remove, any case
    pub tag: String,
}

pub async fn run(client: &HttpClient, args: RemoveTagArgs) -> Result<()> {
    client
        .remove_tag(&args.id, &args.tag)
        .await
        .with_context(|| format!("Failed to untag post {}", args.id))?;

    output::success(&format!("Removed '{}' from post {}", args.tag, args.id));
    Ok(())
}
