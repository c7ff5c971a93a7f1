//! Workspace reset: delete the previous run's output and clone directories
//! so every run starts from a clean slate. Clone directories left behind by
//! a successful run are only removed here, at the start of the next run.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::config::SyncConfig;
use crate::error::{Error, Result};

/// Remove the output directories and temporary clone directories from a
/// previous run. A directory that does not exist is fine; any other
/// filesystem error aborts the run.
pub fn reset(config: &SyncConfig) -> Result<()> {
    let dirs = config
        .routes
        .iter()
        .map(|route| route.output_dir.as_path())
        .chain(
            config
                .repositories
                .iter()
                .map(|repo| repo.clone_dir.as_path()),
        );

    for dir in dirs {
        remove_dir_if_present(dir)?;
    }

    Ok(())
}

fn remove_dir_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!("Removed '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Workspace {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}
