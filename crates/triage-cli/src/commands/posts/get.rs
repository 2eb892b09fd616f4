//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use triage_http::HttpClient;

use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Post id
    pub id: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(client: &HttpClient, args: GetArgs) -> Result<()> {
    let post = client
        .get_post(&args.id)
        .await
        .with_context(|| format!("Failed to get post {}", args.id))?;

    if args.json {
        output::json_pretty(&post)
    } else {
        output::post_detail(&post);
        Ok(())
    }
}
