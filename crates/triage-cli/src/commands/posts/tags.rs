//! Tags command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use triage_http::HttpClient;

use crate::output;

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(client: &HttpClient, args: TagsArgs) -> Result<()> {
    let tags = client.list_tags().await.context("Failed to list tags")?;

    if args.json {
        return output::json(&tags);
    }

    if tags.is_empty() {
        eprintln!("{}", "No tags in use.".dimmed());
    }

    for tag in &tags {
        println!("{}", tag);
    }

    Ok(())
}
