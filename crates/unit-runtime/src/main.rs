//! # srcunit
//!
//! Discovers and inspects source units.
//!
//! ## Startup Sequence
//!
//! 1. Parse flags and load configuration (defaults → env → flags)
//! 2. Initialize logging
//! 3. Build the unit registry and register every toolchain
//! 4. Run the command, writing results to stdout

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use unit_runtime::{build_registry, commands, logging, Cli, RuntimeConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = cli.apply(RuntimeConfig::from_env()?);

    // Initialize logging
    logging::init_logging(&config.log_level)?;
    debug!("Runtime configuration: {:?}", config);

    // Register toolchains
    let registry = build_registry(&config).context("Failed to register unit kinds")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(&cli.command, &registry, &mut out)?;
    out.flush()?;

    Ok(())
}
