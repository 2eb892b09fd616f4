//! Serve command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::{info, warn};

use triage_server::AppState;
use triage_store::MemoryStore;

use crate::output;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// JSON dataset to load
    #[arg(long, env = "TRIAGE_DATA")]
    pub data: PathBuf,

    /// Address to listen on
    #[arg(long, env = "TRIAGE_BIND", default_value = "127.0.0.1:3000")]
    pub bind: String,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let store = MemoryStore::open(&args.data)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let addr = listener
        .local_addr()
        .context("Failed to read listening address")?;

    output::success(&format!(
        "Serving {} posts on http://{}",
        store.len(),
        addr
    ));

    triage_server::serve(listener, AppState::new(store), shutdown_signal())
        .await
        .context("Server failed")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
