//! Interface file discovery: a single-level, case-sensitive glob against the
//! `data/` subdirectory of a cloned repository.

use std::path::{Path, PathBuf};

use glob::MatchOptions;

use crate::error::{Error, Result};

/// Enumerate files under `source_root/<data_subdir>/` whose names match
/// `pattern`. Matching is case-sensitive and does not descend into
/// subdirectories. The result is sorted for deterministic processing order.
pub fn find_interface_files(
    source_root: &Path,
    data_subdir: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>> {
    let glob_path = source_root.join(data_subdir).join(pattern);
    let glob_expr = glob_path.to_str().ok_or_else(|| Error::Workspace {
        path: glob_path.clone(),
        message: "non-UTF-8 path cannot be used as a glob".to_string(),
    })?;

    let options = MatchOptions {
        case_sensitive: true,
        // Keep `*` from crossing directory boundaries; the interface files
        // live directly under data/.
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(glob_expr, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
