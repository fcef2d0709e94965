//! Build script for termynal - embeds git commit hash and build info
//!
//! When the `release` feature is NOT set (default dev builds):
//! - Emits `VERGEN_GIT_SHA` with the commit hash
//! - Emits `TERMYNAL_BUILD_DATE` with the build date
//!
//! When the `release` feature IS set (CI/official builds):
//! - Emits build date only (clean version string without git hash)

use std::process::Command;

/// Current date as YYYY-MM-DD, or "unknown".
fn build_date() -> String {
    Command::new("date")
        .args(["+%Y-%m-%d"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// "owner/repo" from the origin remote, falling back to the manifest.
fn repo_name() -> String {
    Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| parse_repo_from_url(String::from_utf8_lossy(&output.stdout).trim()))
        .unwrap_or_else(|| "simon/termynal-rs".to_string())
}

/// Parse owner/repo from HTTPS (`https://github.com/owner/repo.git`) or SSH
/// (`git@github.com:owner/repo`) remotes.
fn parse_repo_from_url(url: &str) -> Option<String> {
    let url = url.trim_end_matches(".git");
    if let Some(rest) = url.split_once("://").map(|(_, rest)| rest) {
        let path = rest.split_once('/')?.1;
        return (!path.is_empty()).then(|| path.to_string());
    }
    let path = url.split_once(':')?.1;
    (!path.is_empty()).then(|| path.to_string())
}

fn main() {
    println!("cargo:rustc-env=TERMYNAL_REPO_NAME={}", repo_name());
    println!("cargo:rustc-env=TERMYNAL_BUILD_DATE={}", build_date());

    // Release builds carry no git SHA
    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let emitted = GitclBuilder::default()
            .sha(true)
            .build()
            .map_err(|e| e.to_string())
            .and_then(|git| {
                Emitter::default()
                    .add_instructions(&git)
                    .and_then(|emitter| emitter.emit())
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = emitted {
            println!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}
