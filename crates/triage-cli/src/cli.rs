//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::posts::PostsCommand;
use crate::commands::serve::ServeArgs;

/// Serve and browse a social-media moderation queue.
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version = env!("TRIAGE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve a JSON dataset over the REST API
    Serve(ServeArgs),

    /// Query and moderate posts on a running server
    Posts(PostsCommand),
}
