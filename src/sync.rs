//! # Synchronization Pipeline
//!
//! Orchestrates one full run: workspace reset, shallow clone of both
//! upstream repositories, then the four (repository × pattern) processing
//! passes. Everything is sequential; a file is parsed, rewritten, formatted,
//! and written before the next one is touched.
//!
//! ## Error policy
//!
//! - Reset and clone failures abort the run.
//! - A file that fails to parse is logged and skipped; its siblings are
//!   still processed.
//! - A missing or failing formatter downgrades that file to unformatted
//!   output, which is still DOCTYPE-prefixed and written.
//! - A pattern matching zero files logs a diagnostic and moves on.
//!
//! Clone directories are left in place after a successful run; the next
//! run's reset removes them.

use std::fs;
use std::path::Path;

use log::{error, info, warn};

use crate::config::{PatternRoute, SourceRepository, SyncConfig};
use crate::discovery;
use crate::error::{Error, Result};
use crate::formatter::XmlFormatter;
use crate::git;
use crate::transform;
use crate::workspace;

/// Execute one full synchronization run with the given configuration.
pub fn run(config: &SyncConfig) -> Result<()> {
    workspace::reset(config)?;

    for repo in &config.repositories {
        info!("Cloning {} into '{}'", repo.url, repo.clone_dir.display());
        git::clone_shallow(&repo.url, &repo.clone_dir)?;
    }

    let formatter = XmlFormatter::new(
        config.formatter_program.clone(),
        config.formatter_args.clone(),
    );

    for repo in &config.repositories {
        for route in &config.routes {
            process_route(config, repo, route, &formatter)?;
        }
    }

    Ok(())
}

/// Process every file under `repo`'s data directory that matches `route`'s
/// pattern, writing results into `route`'s output directory.
///
/// Public so integration tests can drive the transform-and-emit stage
/// against a local source tree without cloning anything.
pub fn process_route(
    config: &SyncConfig,
    repo: &SourceRepository,
    route: &PatternRoute,
    formatter: &XmlFormatter,
) -> Result<()> {
    info!(
        "Processing pattern '{}' from '{}'",
        route.pattern,
        repo.clone_dir.display()
    );

    // The output directory exists after every run, even one that matched
    // nothing.
    fs::create_dir_all(&route.output_dir)?;

    let files =
        discovery::find_interface_files(&repo.clone_dir, &config.data_subdir, &route.pattern)?;
    if files.is_empty() {
        warn!(
            "No files matched '{}' under '{}'; skipping",
            route.pattern,
            repo.clone_dir.display()
        );
        return Ok(());
    }

    for path in &files {
        // Discovery only yields real files, so a file name is present.
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let output_path = route.output_dir.join(file_name);
        info!("  {} -> {}", path.display(), output_path.display());

        if output_path.exists() {
            warn!(
                "Overwriting '{}'; both repositories ship this file and the last one processed wins",
                output_path.display()
            );
        }

        match process_file(config, path, formatter) {
            Ok(document) => fs::write(&output_path, document)?,
            Err(e) if e.is_per_file() => {
                error!("Skipping '{}': {}", path.display(), e);
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Rewrite, format, and DOCTYPE-prefix a single interface file.
fn process_file(config: &SyncConfig, path: &Path, formatter: &XmlFormatter) -> Result<String> {
    // Undecodable bytes are a parse failure of this file, not a run-fatal
    // I/O error.
    let source = String::from_utf8(fs::read(path)?).map_err(|e| Error::Document {
        message: format!("not valid UTF-8: {e}"),
    })?;
    let fragment = transform::rewrite_document(&source, &config.excluded_interfaces)?;

    let body = match formatter.format(&fragment) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(
                "Formatter failed for '{}', emitting unformatted output: {}",
                path.display(),
                e
            );
            fragment
        }
    };

    Ok(format!("{}\n{}", config.doctype_header, body))
}
