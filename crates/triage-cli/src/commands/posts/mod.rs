//! Post subcommand implementations.

mod add_tag;
mod browse;
mod get;
mod list;
mod remove_tag;
mod set_status;
mod tags;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use triage_core::{Filters, ServerUrl};
use triage_http::HttpClient;

#[derive(Args, Debug)]
pub struct PostsCommand {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostsSubcommand {
    /// Fetch one page of posts
    List(list::ListArgs),

    /// Page through every matching post
    Browse(browse::BrowseArgs),

    /// List every tag in use
    Tags(tags::TagsArgs),

    /// Show a single post
    Get(get::GetArgs),

    /// Change a post's moderation status
    SetStatus(set_status::SetStatusArgs),

    /// Tag a post
    AddTag(add_tag::AddTagArgs),

    /// Untag a post
    RemoveTag(remove_tag::RemoveTagArgs),
}

/// Where the server lives.
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Base URL of the triage server
    #[arg(
        long,
        env = "TRIAGE_SERVER",
        default_value = "http://127.0.0.1:3000",
        global = true
    )]
    pub server: String,
}

impl ServerArgs {
    fn client(&self) -> Result<HttpClient> {
        let url = ServerUrl::new(&self.server).context("Invalid server URL")?;
        HttpClient::new(url).context("Failed to create HTTP client")
    }
}

/// Filter flags shared by `list` and `browse`.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Platform to show, or "all"
    #[arg(long)]
    pub platform: Option<String>,

    /// Status to show, or "all"
    #[arg(long)]
    pub status: Option<String>,

    /// Show posts carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    fn filters(&self) -> Filters {
        Filters {
            platform: self.platform.clone(),
            status: self.status.clone(),
            tags: self.tags.clone(),
            search: self.search.clone(),
        }
    }
}

pub async fn handle(cmd: PostsCommand) -> Result<()> {
    let client = cmd.server.client()?;

    match cmd.command {
        PostsSubcommand::List(args) => list::run(&client, args).await,
        PostsSubcommand::Browse(args) => browse::run(client, args).await,
        PostsSubcommand::Tags(args) => tags::run(&client, args).await,
        PostsSubcommand::Get(args) => get::run(&client, args).await,
        PostsSubcommand::SetStatus(args) => set_status::run(&client, args).await,
        PostsSubcommand::AddTag(args) => add_tag::run(&client, args).await,
        PostsSubcommand::RemoveTag(args) => remove_tag::run(&client, args).await,
    }
}
