//! Stamps the binary version with the git commit it was built from.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match short_commit() {
        Some(commit) => format!("{} ({})", pkg, commit),
        None => pkg.to_string(),
    };

    println!("cargo:rustc-env=TRIAGE_VERSION={}", version);
}

/// Abbreviated HEAD hash, suffixed with `-dirty` for uncommitted changes.
fn short_commit() -> Option<String> {
    let head = git(&["rev-parse", "--short", "HEAD"])?;
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|s| !s.is_empty());

    Some(if dirty { format!("{}-dirty", head) } else { head })
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
