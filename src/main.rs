//! Binary entry point for the `update-interfaces` tool.
//!
//! The binary is a thin wrapper: it parses arguments, initializes logging,
//! and hands the fixed configuration to the library's sync pipeline. A
//! failed clone or workspace reset propagates here and exits non-zero; a
//! single malformed interface file never does.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
