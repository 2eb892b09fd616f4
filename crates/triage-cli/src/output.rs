//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use triage_core::{Post, Status};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn status(status: Status) -> colored::ColoredString {
    match status {
        Status::Flagged => status.as_str().red(),
        Status::UnderReview => status.as_str().yellow(),
        Status::Dismissed => status.as_str().dimmed(),
    }
}

fn tags(post: &Post) -> String {
    post.tags()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Print a post on one line: id, date, platform, status, tags, text.
pub fn post_line(post: &Post) {
    println!(
        "{:>6}  {}  {:<9}  {:<12}  {:<20}  {}",
        post.id.as_str().bold(),
        post.created_at.format("%Y-%m-%d %H:%M"),
        post.platform.as_str(),
        status(post.status),
        format!("[{}]", tags(post)).cyan(),
        post.text
    );
}

/// Print every field of a post.
pub fn post_detail(post: &Post) {
    field("ID", post.id.as_str());
    field("Platform", post.platform.as_str());
    field("Status", &status(post.status).to_string());
    field("Created", &post.created_at.to_rfc3339());
    field("Tags", &tags(post));
    field("Text", &post.text);
}
