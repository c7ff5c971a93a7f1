//! # Run Configuration
//!
//! The synchronization run is driven by an immutable [`SyncConfig`] passed
//! into [`crate::sync::run`]. There is no configuration file and there are
//! no CLI knobs for these values; the upstream URLs, clone targets, glob
//! patterns, and output directories are fixed constants captured by
//! [`SyncConfig::default`]. Keeping them in a value rather than in module
//! globals lets tests run the pipeline against scratch directories.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// The exact two-line D-Bus introspection DOCTYPE prepended to every
/// emitted file. The continuation-line indentation is part of the format.
pub const DOCTYPE_HEADER: &str = "<!DOCTYPE node PUBLIC \"-//freedesktop//DTD D-BUS Object Introspection 1.0//EN\"\n                    \"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd\">";

/// One upstream repository to shallow-clone and harvest interface files from.
#[derive(Debug, Clone)]
pub struct SourceRepository {
    /// Clone URL, passed verbatim to `git clone`.
    pub url: String,
    /// Directory the repository is cloned into. Removed during workspace
    /// reset, left in place after a successful run.
    pub clone_dir: PathBuf,
}

/// One glob pattern and the output directory its matches are written to.
#[derive(Debug, Clone)]
pub struct PatternRoute {
    /// Filename glob matched against files directly under the repository's
    /// data subdirectory (no recursion).
    pub pattern: String,
    /// Directory the rewritten files are emitted into, created on demand.
    pub output_dir: PathBuf,
}

/// Immutable configuration for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upstream repositories in processing order. Order is significant when
    /// both repositories ship a file with the same name: the repository
    /// processed later wins.
    pub repositories: Vec<SourceRepository>,
    /// Pattern routes in processing order, applied to every repository.
    pub routes: Vec<PatternRoute>,
    /// Subdirectory of each clone that holds the interface files.
    pub data_subdir: PathBuf,
    /// Interfaces dropped from every document, matched exactly against the
    /// `name` attribute.
    pub excluded_interfaces: BTreeSet<String>,
    /// Header prepended to every emitted file.
    pub doctype_header: String,
    /// External pretty-printer program name, resolved via `PATH`.
    pub formatter_program: String,
    /// Arguments passed to the pretty-printer. The fragment is supplied on
    /// stdin and the result read from stdout.
    pub formatter_args: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repositories: vec![
                SourceRepository {
                    url: "https://github.com/flatpak/xdg-desktop-portal.git".to_string(),
                    clone_dir: PathBuf::from("/tmp/xdg-portal-interfaces"),
                },
                SourceRepository {
                    url: "https://github.com/flatpak/flatpak.git".to_string(),
                    clone_dir: PathBuf::from("/tmp/flatpak-interfaces"),
                },
            ],
            routes: vec![
                PatternRoute {
                    pattern: "org.freedesktop.portal.*.xml".to_string(),
                    output_dir: PathBuf::from("interfaces"),
                },
                PatternRoute {
                    pattern: "org.freedesktop.impl.portal.*.xml".to_string(),
                    output_dir: PathBuf::from("interfaces/backend"),
                },
            ],
            data_subdir: PathBuf::from("data"),
            excluded_interfaces: ["org.freedesktop.DBus.Peer".to_string()]
                .into_iter()
                .collect(),
            doctype_header: DOCTYPE_HEADER.to_string(),
            formatter_program: "xmllint".to_string(),
            formatter_args: vec!["--format".to_string(), "-".to_string()],
        }
    }
}
