//! Browse command implementation.
//!
//! Drives a [`Pager`] the way an interactive client would: one first page,
//! then "load more" until the results or the page budget run out.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use triage_core::{Pager, PagerStatus};
use triage_http::HttpClient;

use super::FilterArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Posts per request (1-100)
    #[arg(long, default_value_t = triage_core::query::DEFAULT_LIMIT)]
    pub page_size: u32,

    /// Stop after this many pages
    #[arg(long)]
    pub pages: Option<usize>,
}

pub async fn run(client: HttpClient, args: BrowseArgs) -> Result<()> {
    let pager = Pager::with_filters(client, args.filters.filters(), args.page_size);

    pager.load_first().await;
    let mut pages = 1;
    let mut printed = 0;

    loop {
        if let PagerStatus::Error(message) = pager.status() {
            bail!(message);
        }

        let items = pager.items();
        for post in &items[printed..] {
            output::post_line(post);
        }
        printed = items.len();

        if !pager.has_more() || args.pages.is_some_and(|max| pages >= max) {
            break;
        }

        pager.load_more().await;
        pages += 1;
    }

    eprintln!();
    let summary = format!("{} posts in {} pages", printed, pages);
    if pager.has_more() {
        eprintln!("{} (more available)", summary.dimmed());
    } else {
        eprintln!("{}", summary.dimmed());
    }

    Ok(())
}
