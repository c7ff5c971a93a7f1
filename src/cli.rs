//! CLI argument parsing and dispatch

use anyhow::Result;
use clap::Parser;

use update_interfaces::config::SyncConfig;
use update_interfaces::sync;

/// Update the local D-Bus portal interface definitions from upstream
#[derive(Parser, Debug)]
#[command(name = "update-interfaces")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the sync run with the fixed upstream configuration.
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        let config = SyncConfig::default();
        sync::run(&config)?;
        Ok(())
    }
}
