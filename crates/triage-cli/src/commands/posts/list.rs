//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use triage_core::PageRequest;
use triage_http::HttpClient;

use super::FilterArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page size (1-100)
    #[arg(long, default_value_t = triage_core::query::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Cursor returned by the previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Print the raw page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(client: &HttpClient, args: ListArgs) -> Result<()> {
    let request = match args.cursor {
        Some(cursor) => PageRequest::after(cursor, args.limit),
        None => PageRequest::first(args.limit),
    };

    let page = client
        .list_posts(&args.filters.filters(), &request)
        .await
        .context("Failed to list posts")?;

    if args.json {
        return output::json(&page);
    }

    if page.data.is_empty() {
        eprintln!("{}", "No posts found.".dimmed());
        return Ok(());
    }

    for post in &page.data {
        output::post_line(post);
    }

    if let Some(cursor) = &page.next_cursor {
        eprintln!();
        eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
    }

    Ok(())
}
