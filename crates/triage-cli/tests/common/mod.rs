#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;
use triage_server::AppState;
use triage_store::MemoryStore;

/// Five posts, newest first: 1 (reddit, spam), 2 (twitter), 3 (reddit, abuse),
/// 4 (tiktok, spam), 5 (twitter, under review).
pub const DATASET: &str = r#"[
  {"id": 3, "platform": "reddit", "text": "Buy followers now", "status": "flagged", "tags": ["abuse"], "created_at": "2025-06-03T09:00:00Z"},
  {"id": 1, "platform": "Reddit", "text": "Refund scam link", "status": "flagged", "tags": ["Spam"], "created_at": "2025-06-05T09:00:00Z"},
  {"id": 5, "platform": "twitter", "text": "Borderline joke", "status": "under_review", "tags": [], "created_at": "2025-06-01T09:00:00Z"},
  {"id": 2, "platform": "twitter", "text": "Totally normal post", "status": "flagged", "tags": [], "created_at": "2025-06-04T09:00:00Z"},
  {"id": 4, "platform": "tiktok", "text": "Crypto giveaway", "status": "flagged", "tags": ["spam"], "created_at": "2025-06-02T09:00:00Z"}
]"#;

/// Write [`DATASET`] into a fresh temp dir.
pub fn write_dataset() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posts.json");
    std::fs::write(&path, DATASET).unwrap();
    (dir, path)
}

/// A server running on its own runtime thread for the life of the test
/// process.
pub struct TestServer {
    pub url: String,
    _data: TempDir,
}

pub fn start_server() -> TestServer {
    let (dir, path) = write_dataset();
    let store = MemoryStore::open(&path).unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            triage_server::serve(listener, AppState::new(store), std::future::pending())
                .await
                .unwrap();
        });
    });

    TestServer {
        url: format!("http://{}", addr),
        _data: dir,
    }
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_triage"));
    cmd.args(args);
    cmd.env_remove("TRIAGE_SERVER");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run a `posts` subcommand against `server`.
pub fn run_posts(server: &TestServer, args: &[&str]) -> Output {
    let mut full = vec!["posts", "--server", server.url.as_str()];
    full.extend_from_slice(args);
    run_cli(&full)
}

/// Run a `posts` subcommand and expect success.
pub fn run_posts_success(server: &TestServer, args: &[&str]) -> String {
    let output = run_posts(server, args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// First column of every output line: the post ids.
pub fn ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

