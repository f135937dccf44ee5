//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unit_core::{DuplicatePolicy, ScanOptions};

use crate::config::RuntimeConfig;
use crate::startup::Toolchain;

/// srcunit: discover and inspect source units
#[derive(Parser, Debug)]
#[command(name = "srcunit", version)]
#[command(about = "Discover, register and inspect source units (Go packages, Ruby gems, scripts)")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (overrides SRCUNIT_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Behavior on duplicate kind registration: reject or replace
    /// (overrides SRCUNIT_DUPLICATE_POLICY)
    #[arg(long, global = true)]
    pub duplicate_policy: Option<DuplicatePolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Discover source units in a directory tree and print them as JSON
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// URI of the repository
        #[arg(long)]
        repo: Option<String>,

        /// Path of DIR relative to the repository root
        #[arg(long)]
        subdir: Option<String>,

        /// Restrict the scan to one toolchain
        #[arg(long, value_enum, default_value_t = Toolchain::All)]
        toolchain: Toolchain,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Load unit definitions from a TOML file and print their projections
    Units {
        /// Units file with [[unit]] tables
        file: PathBuf,

        /// Print a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// List registered unit kinds
    Kinds,
}

impl Cli {
    /// Apply flag overrides on top of `config`.
    pub fn apply(&self, mut config: RuntimeConfig) -> RuntimeConfig {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(policy) = self.duplicate_policy {
            config.duplicate_policy = policy;
        }
        config
    }
}

impl Command {
    /// Scan options carried by a `scan` command.
    pub fn scan_options(&self) -> Option<ScanOptions> {
        match self {
            Command::Scan { repo, subdir, .. } => Some(ScanOptions {
                repo: repo.clone(),
                subdir: subdir.clone(),
            }),
            _ => None,
        }
    }
}
