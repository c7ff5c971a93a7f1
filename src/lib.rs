//! # update-interfaces
//!
//! This library implements the synchronization pipeline behind the
//! `update-interfaces` command-line tool: it refreshes a local tree of D-Bus
//! interface definition files from the upstream `xdg-desktop-portal` and
//! `flatpak` repositories.
//!
//! ## Execution Flow
//!
//! The main entry point is [`sync::run`], which executes the following
//! steps, strictly sequentially:
//!
//! 1.  **Reset**: Remove the output directories and the temporary clone
//!     directories from any previous run.
//! 2.  **Fetch**: Shallow-clone both upstream repositories.
//! 3.  **Transform and emit**: For each (repository, pattern) combination,
//!     discover the matching interface files under the repository's `data/`
//!     directory and rewrite each one independently: strip `annotation`
//!     elements, drop excluded interfaces, pretty-print through `xmllint`,
//!     prepend the D-Bus introspection DOCTYPE, and write the result to the
//!     output directory associated with the pattern.
//!
//! ## Core Concepts
//!
//! - **Configuration ([`config`])**: An immutable [`config::SyncConfig`]
//!   enumerating the upstream repositories, the pattern-to-output routes,
//!   the interface exclusion set, and the formatter command. The defaults
//!   carry the fixed upstream constants.
//! - **Transform ([`transform`])**: A pure rewrite of one interface
//!   definition document into a fresh `<node>` tree containing only the
//!   retained, annotation-free interfaces.
//! - **Formatter ([`formatter`])**: A narrow boundary around the external
//!   pretty-printer; callers decide what to do when it is unavailable.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use update_interfaces::transform;
//!
//! let source = r#"<node name="/">
//!   <interface name="com.example.Foo">
//!     <method name="Bar">
//!       <annotation name="org.example.Hint" value="x"/>
//!     </method>
//!   </interface>
//!   <interface name="org.freedesktop.DBus.Peer">
//!     <method name="Ping"/>
//!   </interface>
//! </node>"#;
//!
//! let excluded: BTreeSet<String> =
//!     ["org.freedesktop.DBus.Peer".to_string()].into();
//! let output = transform::rewrite_document(source, &excluded).unwrap();
//!
//! assert!(output.contains("com.example.Foo"));
//! assert!(!output.contains("org.freedesktop.DBus.Peer"));
//! assert!(!output.contains("annotation"));
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod formatter;
pub mod git;
pub mod sync;
pub mod transform;
pub mod workspace;
