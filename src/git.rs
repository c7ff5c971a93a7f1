//! Shallow clone of an upstream repository via the system git command.
//!
//! Using the system git means credential helpers, SSH keys, and proxy
//! configuration from the host all apply without any handling here. Both
//! upstream repositories are public, so in practice no authentication is
//! involved.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Clone the default branch of `url` into `target_dir` at depth 1.
///
/// The workspace reset guarantees `target_dir` does not exist. Any failure
/// (missing git binary, network error, non-zero exit) is fatal to the run.
pub fn clone_shallow(url: &str, target_dir: &Path) -> Result<()> {
    // git refuses to clone into an existing non-empty directory; parents
    // must exist though.
    if let Some(parent) = target_dir.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let output = Command::new("git")
        .args(["clone", "--depth", "1", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr.trim().to_string(),
        });
    }

    Ok(())
}
